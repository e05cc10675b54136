//! The supervisor surface: an actor whose pipeline additionally carries a
//! [`ChildManagerPlugin`], plus the builders that construct one and the
//! children under it (spec ยง4.4, ยง6 "External Interfaces").
//!
//! Nothing here is a new runtime concept beyond what [`crate::actor`] and
//! [`crate::plugin`] already provide — a supervisor is exactly a plain actor
//! with one extra canonical-order slot installed (spec ยง4.2's canonical
//! order already reserves #7 for it). This module is the construction-time
//! facade spec ยง6 names (`supervisor.create_actor<T>().timeout(d).finish()`,
//! `supervisor.do_process()`), not a distinct lifecycle engine.

pub mod config;

pub use crate::plugin::child_manager::SupervisorPolicy;
pub use config::SupervisorConfig;

// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;

// Layer 3: Internal module imports
use crate::actor::{ActorCell, ActorConfig, ActorHandle, ActorState};
use crate::error::{NodalError, ShutdownReason};
use crate::locality::{Locality, LocalityDirectory};
use crate::monitoring::RuntimeMonitor;
use crate::plugin::address_maker::AddressMakerPlugin;
use crate::plugin::child_manager::ChildManagerPlugin;
use crate::plugin::delivery::DeliveryPlugin;
use crate::plugin::foreigners_support::ForeignersSupportPlugin;
use crate::plugin::init_shutdown::InitShutdownPlugin;
use crate::plugin::lifetime::LifetimePlugin;
use crate::plugin::link_client::LinkClientPlugin;
use crate::plugin::link_server::LinkServerPlugin;
use crate::plugin::locality_binding::LocalityBindingPlugin;
use crate::plugin::starter::StarterPlugin;
use crate::plugin::Pipeline;
use crate::protocol::StartTrigger;
use crate::util::{ActorId, Address, LocalityId};

/// The canonical nine-slot pipeline for a plain, non-supervising actor:
/// every slot from spec ยง4.2's canonical order except `ChildManager` (#7).
fn plain_pipeline() -> Pipeline {
    Pipeline::new(vec![
        Box::new(AddressMakerPlugin::new()),
        Box::new(LocalityBindingPlugin::new()),
        Box::new(DeliveryPlugin::new()),
        Box::new(LifetimePlugin::new()),
        Box::new(InitShutdownPlugin::new()),
        Box::new(ForeignersSupportPlugin::new()),
        Box::new(LinkClientPlugin::new()),
        Box::new(LinkServerPlugin::new()),
        Box::new(StarterPlugin::new()),
    ])
}

/// As [`plain_pipeline`], with a [`ChildManagerPlugin`] inserted at its
/// canonical order slot (#7, between foreigners-support and link-client) —
/// the only thing distinguishing a supervisor from a plain actor.
fn supervisor_pipeline(policy: SupervisorPolicy, synchronize_start: bool) -> Pipeline {
    Pipeline::new(vec![
        Box::new(AddressMakerPlugin::new()),
        Box::new(LocalityBindingPlugin::new()),
        Box::new(DeliveryPlugin::new()),
        Box::new(LifetimePlugin::new()),
        Box::new(InitShutdownPlugin::new()),
        Box::new(ForeignersSupportPlugin::new()),
        Box::new(ChildManagerPlugin::new(policy, synchronize_start)),
        Box::new(LinkClientPlugin::new()),
        Box::new(LinkServerPlugin::new()),
        Box::new(StarterPlugin::new()),
    ])
}

/// Build, bind, and activate a fresh cell on `locality`, then drive it
/// through the shared construction steps every actor (supervisor or not)
/// goes through before it is handed back to its caller: pipeline
/// installation and `activate_plugins`. Does not touch lifecycle state —
/// that is the caller's job, since root supervisors and ordinary children
/// reach INITIALIZING differently (spec ยง3, ยง4.4).
fn build_cell(
    id: ActorId,
    locality: &Arc<Locality>,
    directory: &Arc<LocalityDirectory>,
    config: ActorConfig,
    supervisor_address: Option<Address>,
    monitor: Option<Arc<dyn RuntimeMonitor>>,
    pipeline: Pipeline,
) -> ActorHandle {
    let mut cell = ActorCell::new(id, Arc::clone(locality), Arc::clone(directory), config, supervisor_address);
    if let Some(monitor) = monitor {
        cell = cell.with_monitor(monitor);
    }
    let shared = Arc::new(Mutex::new(cell));
    let weak = Arc::downgrade(&shared);
    {
        let mut locked = shared.lock();
        locked.bind_self_ref(weak);
        locked.install_pipeline(pipeline);
        locked.activate_plugins();
    }
    ActorHandle::new(shared)
}

/// A supervisor: an [`ActorHandle`] whose pipeline carries a
/// [`ChildManagerPlugin`], plus the locality/directory its children are
/// constructed against (spec C8, ยง4.4).
pub struct Supervisor {
    handle: ActorHandle,
    locality: Arc<Locality>,
    directory: Arc<LocalityDirectory>,
}

impl Supervisor {
    /// Construct a root supervisor (no parent) directly on `locality`, drive
    /// it straight through to `OPERATIONAL`, and return it — or
    /// `Err(NodalError)` if `config` fails [`SupervisorConfig::validate`]
    /// (spec ยง7.1).
    ///
    /// A root has no parent to send it `initialize_actor_t`/`start_trigger_t`
    /// from the outside, so construction drives both transitions inline,
    /// mirroring how [`ActorCell::do_shutdown`] already handles a root's own
    /// shutdown trigger without a parent round trip.
    pub fn root(locality: Arc<Locality>, directory: Arc<LocalityDirectory>, config: SupervisorConfig) -> Result<Self, NodalError> {
        Self::root_with_monitor(locality, directory, config, None)
    }

    /// As [`Supervisor::root`], attaching `monitor` to the root cell instead
    /// of the default no-op sink.
    pub fn root_with_monitor(
        locality: Arc<Locality>,
        directory: Arc<LocalityDirectory>,
        config: SupervisorConfig,
        monitor: Option<Arc<dyn RuntimeMonitor>>,
    ) -> Result<Self, NodalError> {
        config.validate()?;
        let pipeline = supervisor_pipeline(config.policy_value(), config.synchronize_start_value());
        let handle = build_cell(ActorId::new(), &locality, &directory, config.actor_config().clone(), None, monitor, pipeline);

        {
            let mut cell = handle.cell().lock();
            cell.begin_init();
            cell.init_continue();
            if let Some(starter) = cell.starter_address() {
                cell.send(starter, StartTrigger);
            }
        }
        locality.do_process();

        Ok(Self { handle, locality, directory })
    }

    /// This supervisor's handle (spec ยง6 `ref<T>`).
    pub fn handle(&self) -> &ActorHandle {
        &self.handle
    }

    /// This supervisor's primary address.
    pub fn address(&self) -> Address {
        self.handle.address()
    }

    /// This supervisor's current lifecycle state.
    pub fn state(&self) -> ActorState {
        self.handle.state()
    }

    /// The locality this supervisor (and every child constructed through
    /// it) is bound to.
    pub fn locality(&self) -> &Arc<Locality> {
        &self.locality
    }

    /// Drain this supervisor's locality queue (spec ยง6 `supervisor.do_process()`).
    pub fn do_process(&self) {
        self.locality.do_process();
    }

    /// Request this supervisor shut down for `reason` (spec ยง6 `actor.do_shutdown`).
    pub fn do_shutdown(&self, reason: ShutdownReason) {
        self.handle.do_shutdown(reason);
    }

    /// Begin building a plain (non-supervising) child under this supervisor
    /// (spec ยง6 `supervisor.create_actor<T>()`).
    pub fn create_actor(&self) -> CreateActorBuilder<'_> {
        CreateActorBuilder { supervisor: self, config: ActorConfig::default() }
    }

    /// Drive `child`'s init timer to expiry directly, bypassing a concrete
    /// timer driver (spec §8 E2E scenarios 3/4: "Manually fire C's init
    /// timer"). A no-op if `child` is not a currently tracked child.
    pub fn simulate_child_init_timeout(&self, child: Address) {
        self.handle.cell().lock().with_plugin_cell::<ChildManagerPlugin, _>(|plugin, cell| {
            plugin.simulate_init_timeout(cell, child);
        });
    }

    /// Begin building a nested supervisor under this one, with its own
    /// `policy`/`synchronize_start` (spec ยง9 Open Question: see DESIGN.md
    /// for why this is a dedicated method rather than a generic type
    /// parameter on `create_actor`).
    pub fn create_supervisor(&self, policy: SupervisorPolicy, synchronize_start: bool) -> CreateSupervisorBuilder<'_> {
        CreateSupervisorBuilder { supervisor: self, config: ActorConfig::default(), policy, synchronize_start }
    }

    /// Validate a pinned locality id against this supervisor's own,
    /// construct a fresh child cell with `pipeline`, and register it with
    /// this supervisor's [`ChildManagerPlugin`]. Cross-locality pinning
    /// (`ActorConfig::locality`) is only supported as a same-locality
    /// assertion here — actually placing a child on a different locality
    /// means constructing an independent [`Supervisor::root`] on that
    /// locality instead (see DESIGN.md).
    fn spawn_child(&self, config: ActorConfig, pipeline: Pipeline) -> ActorHandle {
        if let Some(pinned) = config.locality_value() {
            debug_assert_eq!(pinned, self.locality.id(), "cross-locality child spawn is not supported from a single Supervisor");
        }
        let timeout = config.init_timeout_value();
        let handle = build_cell(ActorId::new(), &self.locality, &self.directory, config, Some(self.address()), None, pipeline);

        let child_handle = handle.clone();
        self.handle.cell().lock().with_plugin_cell::<ChildManagerPlugin, _>(move |plugin, cell| {
            plugin.create_child(cell, child_handle, timeout);
        });

        handle
    }
}

/// Fluent builder for a plain child actor (spec ยง6 `.timeout(d).finish()`).
pub struct CreateActorBuilder<'a> {
    supervisor: &'a Supervisor,
    config: ActorConfig,
}

impl<'a> CreateActorBuilder<'a> {
    /// Set both `init_timeout` and `shutdown_timeout` to `d`.
    pub fn timeout(mut self, d: Duration) -> Self {
        self.config = self.config.timeout(d);
        self
    }

    /// Override just the init timeout.
    pub fn init_timeout(mut self, d: Duration) -> Self {
        self.config = self.config.init_timeout(d);
        self
    }

    /// Override just the shutdown timeout.
    pub fn shutdown_timeout(mut self, d: Duration) -> Self {
        self.config = self.config.shutdown_timeout(d);
        self
    }

    /// Pin this actor to a specific locality instead of inheriting its
    /// supervisor's.
    pub fn locality(mut self, id: LocalityId) -> Self {
        self.config = self.config.locality(id);
        self
    }

    /// Validate and construct the child (spec ยง6 `create_actor`'s
    /// side effect: "the new actor is inserted into the supervisor's
    /// children map and an init request is enqueued"). `Err(NodalError)` on
    /// invalid configuration, with nothing inserted (spec ยง7.1).
    pub fn finish(self) -> Result<ActorHandle, NodalError> {
        self.config.validate()?;
        Ok(self.supervisor.spawn_child(self.config, plain_pipeline()))
    }
}

/// Fluent builder for a nested supervisor (spec ยง6 `.finish()`, scenario 6's
/// supervisor tree).
pub struct CreateSupervisorBuilder<'a> {
    supervisor: &'a Supervisor,
    config: ActorConfig,
    policy: SupervisorPolicy,
    synchronize_start: bool,
}

impl<'a> CreateSupervisorBuilder<'a> {
    /// Set both `init_timeout` and `shutdown_timeout` to `d`.
    pub fn timeout(mut self, d: Duration) -> Self {
        self.config = self.config.timeout(d);
        self
    }

    /// Override just the init timeout.
    pub fn init_timeout(mut self, d: Duration) -> Self {
        self.config = self.config.init_timeout(d);
        self
    }

    /// Override just the shutdown timeout.
    pub fn shutdown_timeout(mut self, d: Duration) -> Self {
        self.config = self.config.shutdown_timeout(d);
        self
    }

    /// Validate and construct the nested supervisor, registering it as a
    /// child of its parent exactly like [`CreateActorBuilder::finish`].
    /// `Err(NodalError)` on invalid configuration.
    pub fn finish(self) -> Result<Supervisor, NodalError> {
        self.config.validate()?;
        let pipeline = supervisor_pipeline(self.policy, self.synchronize_start);
        let handle = self.supervisor.spawn_child(self.config, pipeline);
        Ok(Supervisor {
            handle,
            locality: Arc::clone(&self.supervisor.locality),
            directory: Arc::clone(&self.supervisor.directory),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_root() -> Supervisor {
        let locality = Arc::new(Locality::new(LocalityId::new()));
        let directory = Arc::new(LocalityDirectory::new());
        Supervisor::root(locality, directory, SupervisorConfig::default().timeout(Duration::from_millis(1000)))
            .expect("valid config")
    }

    #[test]
    fn root_reaches_operational_on_construction() {
        let supervisor = sample_root();
        assert_eq!(supervisor.state(), ActorState::Operational);
    }

    #[test]
    fn invalid_config_yields_no_supervisor() {
        let locality = Arc::new(Locality::new(LocalityId::new()));
        let directory = Arc::new(LocalityDirectory::new());
        let config = SupervisorConfig::default().timeout(Duration::from_millis(0));
        assert!(Supervisor::root(locality, directory, config).is_err());
    }

    #[test]
    fn create_actor_inserts_child_and_enqueues_init() {
        let supervisor = sample_root();
        let child = supervisor.create_actor().timeout(Duration::from_millis(500)).finish().expect("valid child config");
        assert_eq!(child.state(), ActorState::New);
        supervisor.do_process();
        assert_eq!(child.state(), ActorState::Operational);
    }

    #[test]
    fn create_actor_rejects_zero_timeout() {
        let supervisor = sample_root();
        let child = supervisor.create_actor().timeout(Duration::from_millis(0)).finish();
        assert!(child.is_err());
    }

    #[test]
    fn create_supervisor_builds_a_nested_supervisor() {
        let root = sample_root();
        let nested = root
            .create_supervisor(SupervisorPolicy::ShutdownSelf, false)
            .timeout(Duration::from_millis(500))
            .finish()
            .expect("valid nested config");
        assert_eq!(nested.state(), ActorState::New);
        root.do_process();
        assert_eq!(nested.state(), ActorState::Operational);
    }
}
