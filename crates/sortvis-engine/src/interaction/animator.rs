//! The [`Animator`]: mode dispatch, run setup and teardown.
//!
//! The animator is single-threaded from the caller's point of view. While a
//! run is in flight the orchestrator's threads own the datasets and the
//! animator accepts no input; [`Animator::poll`] notices the finished run
//! and moves to [`Mode::Sorted`].

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sortvis_algorithm::{AlgorithmRegistry, RunQueue};
use sortvis_core::{AlgorithmId, Dataset, RunError, RunId};

use crate::config::{AnimatorConfig, StartupError};
use crate::interaction::config_form::{ConfigForm, FormAction};
use crate::interaction::help::{HelpDocument, HelpView};
use crate::interaction::mode::{Input, Key, Mode, Transition};
use crate::metrics::RunReport;
use crate::orchestrator::{Orchestrator, PlannedLane, RunHandle, RunPlan};
use crate::surface::{Canvas, LaneBinding, SharedSurface};

/// State that lives from starting a run until returning to the form.
#[derive(Debug, Default)]
struct Session {
    queue: RunQueue,
    datasets: Vec<Arc<Dataset>>,
    handle: Option<RunHandle>,
    report: Option<RunReport>,
}

/// The interaction state machine and everything it owns.
pub struct Animator<C: Canvas> {
    config: AnimatorConfig,
    mode: Mode,
    running: bool,
    registry: AlgorithmRegistry,
    form: ConfigForm,
    help: HelpView,
    surface: Arc<SharedSurface<C>>,
    orchestrator: Orchestrator,
    rng: ChaCha8Rng,
    session: Session,
    next_run: RunId,
}

impl<C: Canvas> Animator<C> {
    /// Validate `config`, load the help file it names, and take ownership
    /// of `canvas`.
    pub fn new(
        config: AnimatorConfig,
        registry: AlgorithmRegistry,
        canvas: C,
    ) -> Result<Self, StartupError> {
        config.validate()?;
        let help = HelpDocument::load(&config.help_path)?;
        Self::with_help(config, registry, canvas, help)
    }

    /// Like [`new`](Self::new) with an already loaded help document.
    pub fn with_help(
        config: AnimatorConfig,
        registry: AlgorithmRegistry,
        canvas: C,
        help: HelpDocument,
    ) -> Result<Self, StartupError> {
        config.validate()?;
        let surface = Arc::new(SharedSurface::new(canvas, config.viewport));
        let orchestrator = Orchestrator::new(surface.clone(), config.highlight_ticks);
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(
            algorithms = registry.len(),
            viewport = %config.viewport,
            seed,
            "animator ready"
        );
        Ok(Self {
            help: HelpView::new(help, config.viewport),
            form: ConfigForm::new(config.default_quantity),
            mode: Mode::Start,
            running: true,
            registry,
            surface,
            orchestrator,
            rng: ChaCha8Rng::seed_from_u64(seed),
            session: Session::default(),
            next_run: RunId(1),
            config,
        })
    }

    // ── Input ──────────────────────────────────────────────────────

    /// Apply one input to the current mode.
    ///
    /// Ignored entirely while sorting, including [`Input::Quit`].
    pub fn handle(&mut self, input: Input) {
        if !self.running || self.mode == Mode::Sorting {
            return;
        }
        if input == Input::Quit {
            tracing::info!(mode = %self.mode, "session closed");
            self.running = false;
            return;
        }
        let transition = match self.mode {
            Mode::Start => Transition::To(Mode::Help),
            Mode::Help => self.handle_help(input),
            Mode::Config => self.handle_config(input),
            Mode::Sorting => Transition::Stay,
            Mode::Sorted => self.handle_sorted(input),
        };
        if let Transition::To(mode) = transition {
            self.transition(mode);
        }
    }

    fn handle_help(&mut self, input: Input) -> Transition {
        let step = self.config.scroll_step as isize;
        match input {
            Input::Key(Key::Enter | Key::Escape) | Input::Click => {
                return Transition::To(Mode::Config)
            }
            Input::Key(Key::Up | Key::Left) => self.help.scroll_by(-step),
            Input::Key(Key::Down | Key::Right) => self.help.scroll_by(step),
            Input::Wheel(delta) => self
                .help
                .scroll_by(-(delta as isize) * self.config.wheel_step as isize),
            Input::ScrollTo(position) => self.help.scroll_to(position),
            _ => {}
        }
        Transition::Stay
    }

    fn handle_config(&mut self, input: Input) -> Transition {
        let algorithms = self.registry.len();
        let action = match input {
            Input::Key(key) => self.form.handle_key(key, algorithms),
            Input::PickField(index) => self.form.pick(index, algorithms),
            _ => FormAction::Stay,
        };
        match action {
            FormAction::Stay => Transition::Stay,
            FormAction::Toggle(id) => {
                if let Some(selected) = self.registry.toggle(id) {
                    tracing::debug!(algorithm = %id, selected, "toggled algorithm");
                }
                Transition::Stay
            }
            FormAction::Start => {
                self.prepare_run();
                Transition::To(Mode::Sorting)
            }
            FormAction::Help => Transition::To(Mode::Help),
            FormAction::Cancel => Transition::To(Mode::Start),
        }
    }

    fn handle_sorted(&mut self, input: Input) -> Transition {
        match input {
            Input::Key(Key::Enter | Key::Escape | Key::Backspace) => {
                self.teardown();
                Transition::To(Mode::Config)
            }
            Input::Key(Key::Replay) => {
                self.reseed_for_replay();
                Transition::To(Mode::Sorting)
            }
            _ => Transition::Stay,
        }
    }

    fn transition(&mut self, to: Mode) {
        tracing::info!(from = %self.mode, to = %to, "mode transition");
        self.mode = to;
        if to == Mode::Sorting {
            self.launch();
        }
    }

    // ── Runs ───────────────────────────────────────────────────────

    /// Build the run queue and one copy of a fresh shuffled base sequence
    /// per lane, then bind them to the surface.
    fn prepare_run(&mut self) {
        let quantity = self.form.commit();
        let queue = self.registry.selected_ids();
        let base = Dataset::shuffled(quantity, &mut self.rng);
        let datasets = queue.iter().map(|_| Arc::new(base.clone())).collect();
        self.session = Session {
            queue,
            datasets,
            handle: None,
            report: None,
        };
        self.surface.bind(self.bindings());
    }

    /// Every lane starts again from lane 0's output order.
    fn reseed_for_replay(&mut self) {
        if let Some(first) = self.session.datasets.first() {
            let order = first.values();
            for dataset in &self.session.datasets {
                dataset.reseed_from(&order);
            }
        }
        self.session.report = None;
        self.surface.bind(self.bindings());
    }

    fn teardown(&mut self) {
        self.surface.unbind();
        self.session = Session::default();
    }

    fn bindings(&self) -> Vec<LaneBinding> {
        self.planned_lanes()
            .into_iter()
            .map(|lane| LaneBinding {
                name: lane.name,
                dataset: lane.dataset,
            })
            .collect()
    }

    fn planned_lanes(&self) -> Vec<PlannedLane> {
        self.session
            .queue
            .iter()
            .zip(&self.session.datasets)
            .filter_map(|(&algorithm, dataset)| {
                let entry = self.registry.get(algorithm)?;
                Some(PlannedLane {
                    algorithm,
                    name: entry.name.clone(),
                    sorter: Arc::clone(&entry.algorithm),
                    dataset: Arc::clone(dataset),
                })
            })
            .collect()
    }

    fn launch(&mut self) {
        let id = self.next_run;
        self.next_run = id.next();
        let plan = RunPlan {
            id,
            lanes: self.planned_lanes(),
        };
        if plan.lanes.is_empty() {
            tracing::info!(run = %id, "nothing selected");
            self.surface.settle();
            self.finish(RunReport::empty(id));
            return;
        }
        match self.orchestrator.launch(plan.clone()) {
            Ok(handle) => self.session.handle = Some(handle),
            Err(e) => {
                tracing::error!(run = %id, error = %e, "running on the caller thread instead");
                let report = self.orchestrator.run_blocking(plan);
                self.finish(report);
            }
        }
    }

    fn complete(&mut self, id: RunId, result: Result<RunReport, RunError>) {
        let report = result.unwrap_or_else(|e| {
            tracing::error!(run = %id, error = %e, "run ended without a report");
            self.surface.settle();
            RunReport::empty(id)
        });
        self.finish(report);
    }

    fn finish(&mut self, report: RunReport) {
        self.session.handle = None;
        self.session.report = Some(report);
        self.transition(Mode::Sorted);
    }

    /// Collect a finished run without blocking. Returns `true` when this
    /// call moved the animator to [`Mode::Sorted`].
    pub fn poll(&mut self) -> bool {
        if self.mode != Mode::Sorting {
            return false;
        }
        let Some(handle) = self.session.handle.as_mut() else {
            return false;
        };
        let id = handle.id();
        match handle.try_finish() {
            Some(result) => {
                self.complete(id, result);
                true
            }
            None => false,
        }
    }

    /// Block until the current run finishes. Returns its report, or the
    /// last one when nothing is running.
    pub fn wait_for_run(&mut self) -> Option<&RunReport> {
        if self.mode == Mode::Sorting {
            if let Some(handle) = self.session.handle.take() {
                let id = handle.id();
                let result = handle.wait();
                self.complete(id, result);
            }
        }
        self.session.report.as_ref()
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// `false` once [`Input::Quit`] has been accepted.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The validated configuration.
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Registered plug-ins and their selection flags.
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Mutable registry, for preselecting plug-ins.
    pub fn registry_mut(&mut self) -> &mut AlgorithmRegistry {
        &mut self.registry
    }

    /// The configuration form.
    pub fn form(&self) -> &ConfigForm {
        &self.form
    }

    /// The wrapped help text and its scroll position.
    pub fn help(&self) -> &HelpView {
        &self.help
    }

    /// Algorithms of the current run, in lane order.
    pub fn run_queue(&self) -> &[AlgorithmId] {
        &self.session.queue
    }

    /// Datasets of the current run, in lane order.
    pub fn datasets(&self) -> &[Arc<Dataset>] {
        &self.session.datasets
    }

    /// Report of the most recent finished run, until returning to the form.
    pub fn last_report(&self) -> Option<&RunReport> {
        self.session.report.as_ref()
    }

    /// The shared rendering surface.
    pub fn surface(&self) -> &Arc<SharedSurface<C>> {
        &self.surface
    }
}
