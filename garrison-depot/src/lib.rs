//! Garrison Depot Engine
//!
//! Platform-agnostic core of the logistics vehicle tracker for the Garrison
//! clan dashboard. This crate owns the fleet lifecycle state machine, crew
//! seats, the bounded operations journal, the supply ledger and the
//! command-squad projection, without UI or platform-specific dependencies.

pub mod catalog;
pub mod chat;
pub mod constants;
pub mod crew;
pub mod dispatch;
pub mod fleet;
pub mod journal;
pub mod roster;
pub mod state;
pub mod supply;
pub mod sync;
pub mod tenure;

// Re-export commonly used types
pub use catalog::{SeatList, SeatRole, VehicleCatalog, VehicleGroup, VehicleTemplate};
pub use chat::{ChatMessage, ChatTranscript};
pub use constants::{COMMAND_SQUAD_NAME, JOURNAL_CAP, NO_COMMANDER, UNASSIGNED_OFFICER};
pub use crew::{assign_seat, commander};
pub use dispatch::{
    DispatchError, MissionReturn, deploy, destroy, garage_return, repair_and_resupply,
    return_mission, start_mission,
};
pub use fleet::{FleetRegistry, VehicleId, VehicleInstance, VehicleStatus};
pub use journal::{Journal, LogEntry, LogKind};
pub use roster::{Rank, Roster, RosterDirectory, Trooper, prefill_rank};
pub use state::DepotState;
pub use supply::{SupplyLedger, SupplyLocation};
pub use sync::{
    ArchiveEntry, ArchiveLedger, DeploymentStatus, SquadDirectory, SquadRecord,
    sync_command_squad,
};
pub use tenure::{ServiceTenure, Session};

/// Trait for abstracting the durable record store.
/// Platform-specific implementations should provide this; each aggregate
/// section persists under its own key.
pub trait DepotStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the fleet record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save_fleet(&self, fleet: &FleetRegistry) -> Result<(), Self::Error>;

    /// Load the fleet record, if one was ever written.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn load_fleet(&self) -> Result<Option<FleetRegistry>, Self::Error>;

    /// Persist the journal record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save_journal(&self, journal: &Journal) -> Result<(), Self::Error>;

    /// Load the journal record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn load_journal(&self) -> Result<Option<Journal>, Self::Error>;

    /// Persist the supply record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save_supply(&self, supply: &SupplyLedger) -> Result<(), Self::Error>;

    /// Load the supply record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn load_supply(&self) -> Result<Option<SupplyLedger>, Self::Error>;

    /// Persist the roster record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save_roster(&self, roster: &Roster) -> Result<(), Self::Error>;

    /// Load the roster record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn load_roster(&self) -> Result<Option<Roster>, Self::Error>;

    /// Persist the tenure record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save_tenure(&self, tenure: &ServiceTenure) -> Result<(), Self::Error>;

    /// Load the tenure record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn load_tenure(&self) -> Result<Option<ServiceTenure>, Self::Error>;

    /// Persist the chat transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save_chat(&self, chat: &ChatTranscript) -> Result<(), Self::Error>;

    /// Load the chat transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn load_chat(&self) -> Result<Option<ChatTranscript>, Self::Error>;
}

/// Source of display timestamps stamped onto journal entries, status
/// changes and tenure bounds.
pub trait Clock {
    fn now_label(&self) -> String;
}

/// Wall clock formatted in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_label(&self) -> String {
        chrono::Local::now().format("%d/%m/%Y %H:%M").to_string()
    }
}

/// Main engine binding the depot aggregate to its platform collaborators.
///
/// Every command applies one synchronous mutation, then hands the touched
/// records to the store. Persistence and directory projection are
/// fire-and-forget: failures are logged, never surfaced to the caller, and
/// never roll the mutation back.
pub struct DepotEngine<S, D, A, C = SystemClock>
where
    S: DepotStorage,
    D: SquadDirectory,
    A: ArchiveLedger,
    C: Clock,
{
    storage: S,
    directory: D,
    archive: A,
    clock: C,
    catalog: VehicleCatalog,
    state: DepotState,
}

impl<S, D, A, C> DepotEngine<S, D, A, C>
where
    S: DepotStorage,
    D: SquadDirectory,
    A: ArchiveLedger,
    C: Clock,
{
    /// Create an engine with the bundled vehicle catalog and a fresh state.
    pub fn new(storage: S, directory: D, archive: A, clock: C) -> Self {
        Self {
            storage,
            directory,
            archive,
            clock,
            catalog: catalog::builtin().clone(),
            state: DepotState::default(),
        }
    }

    /// Replace the bundled catalog, e.g. with one loaded from game data.
    #[must_use]
    pub fn with_catalog(mut self, catalog: VehicleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub const fn state(&self) -> &DepotState {
        &self.state
    }

    #[must_use]
    pub const fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn is_supervisor(&self, session: &Session) -> bool {
        self.state.is_supervisor(session)
    }

    /// Consume the engine, returning the underlying aggregate.
    #[must_use]
    pub fn into_state(self) -> DepotState {
        self.state
    }

    /// Restore every persisted record into the aggregate. Records never
    /// written stay at their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any record cannot be read or parsed.
    pub fn restore(&mut self) -> Result<(), anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        if let Some(fleet) = self.storage.load_fleet().map_err(Into::into)? {
            self.state.fleet = fleet;
        }
        if let Some(journal) = self.storage.load_journal().map_err(Into::into)? {
            self.state.journal = journal;
        }
        if let Some(supply) = self.storage.load_supply().map_err(Into::into)? {
            self.state.supply = supply;
        }
        if let Some(roster) = self.storage.load_roster().map_err(Into::into)? {
            self.state.roster = roster;
        }
        if let Some(tenure) = self.storage.load_tenure().map_err(Into::into)? {
            self.state.tenure = tenure;
        }
        if let Some(chat) = self.storage.load_chat().map_err(Into::into)? {
            self.state.chat = chat;
        }
        self.state.rehydrate();
        Ok(())
    }

    // Fleet lifecycle ------------------------------------------------------

    /// Deploy a new vehicle from a catalog template.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors and unknown template ids.
    pub fn deploy(
        &mut self,
        session: &Session,
        template_id: &str,
    ) -> Result<VehicleId, DispatchError> {
        self.ensure_supervisor(session)?;
        let template = self
            .catalog
            .find(template_id)
            .ok_or_else(|| DispatchError::UnknownTemplate(template_id.to_string()))?
            .clone();
        let now = self.clock.now_label();
        let id = dispatch::deploy(&mut self.state, &template, &now);
        self.persist_fleet();
        self.persist_journal();
        Ok(id)
    }

    /// Send a vehicle on mission.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors and invalid transitions.
    pub fn start_mission(
        &mut self,
        session: &Session,
        id: VehicleId,
        details: &str,
    ) -> Result<(), DispatchError> {
        self.ensure_supervisor(session)?;
        let now = self.clock.now_label();
        dispatch::start_mission(&mut self.state, id, details, &now)?;
        self.persist_fleet();
        self.persist_journal();
        Ok(())
    }

    /// Bring a vehicle back from mission, possibly escalating it into
    /// maintenance. Returns the resulting status.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors and invalid transitions.
    pub fn return_mission(
        &mut self,
        session: &Session,
        id: VehicleId,
        debrief: &MissionReturn,
    ) -> Result<VehicleStatus, DispatchError> {
        self.ensure_supervisor(session)?;
        let now = self.clock.now_label();
        let status = dispatch::return_mission(&mut self.state, id, debrief, &now)?;
        self.persist_fleet();
        self.persist_journal();
        Ok(status)
    }

    /// Refuel and repair a vehicle held in maintenance.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors and invalid transitions.
    pub fn repair_and_resupply(
        &mut self,
        session: &Session,
        id: VehicleId,
    ) -> Result<(), DispatchError> {
        self.ensure_supervisor(session)?;
        let now = self.clock.now_label();
        dispatch::repair_and_resupply(&mut self.state, id, &now)?;
        self.persist_fleet();
        self.persist_journal();
        Ok(())
    }

    /// Return a vehicle to the garage, removing it from the registry.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors and invalid transitions.
    pub fn garage_return(
        &mut self,
        session: &Session,
        id: VehicleId,
    ) -> Result<VehicleInstance, DispatchError> {
        self.ensure_supervisor(session)?;
        let now = self.clock.now_label();
        let removed = dispatch::garage_return(&mut self.state, id, &now)?;
        self.persist_fleet();
        self.persist_journal();
        Ok(removed)
    }

    /// Report a vehicle destroyed and remove it from the registry.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors, unknown vehicles and anonymous reports.
    pub fn destroy(
        &mut self,
        session: &Session,
        id: VehicleId,
        reporter: &str,
        reason: &str,
    ) -> Result<VehicleInstance, DispatchError> {
        self.ensure_supervisor(session)?;
        let now = self.clock.now_label();
        let removed = dispatch::destroy(&mut self.state, id, reporter, reason, &now)?;
        self.persist_fleet();
        self.persist_journal();
        Ok(removed)
    }

    // Crew -----------------------------------------------------------------

    /// Assign or clear a seat. Unguarded: any session may staff vehicles.
    ///
    /// # Errors
    ///
    /// Rejects unknown vehicles and seats outside the layout.
    pub fn assign_seat(
        &mut self,
        id: VehicleId,
        seat: &SeatRole,
        occupant: &str,
    ) -> Result<(), DispatchError> {
        let now = self.clock.now_label();
        crew::assign_seat(&mut self.state, id, seat, occupant, &now)?;
        self.persist_fleet();
        self.persist_journal();
        Ok(())
    }

    // Journal --------------------------------------------------------------

    /// Delete a single journal entry. The caller is expected to have
    /// confirmed the deletion.
    ///
    /// # Errors
    ///
    /// Rejects unknown entry ids.
    pub fn delete_log_entry(&mut self, id: u64) -> Result<(), DispatchError> {
        if !self.state.journal.remove(id) {
            return Err(DispatchError::UnknownLogEntry(id));
        }
        self.persist_journal();
        Ok(())
    }

    // Roster ---------------------------------------------------------------

    /// Enlist a member on the logistics roster.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors.
    pub fn add_trooper(
        &mut self,
        session: &Session,
        name: &str,
        rank: Rank,
    ) -> Result<u64, DispatchError> {
        self.ensure_supervisor(session)?;
        let id = self.state.roster.add(name, rank);
        self.persist_roster();
        self.project_command_squad();
        Ok(id)
    }

    /// Strike a member from the logistics roster.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors and unknown roster ids.
    pub fn remove_trooper(
        &mut self,
        session: &Session,
        id: u64,
    ) -> Result<Trooper, DispatchError> {
        self.ensure_supervisor(session)?;
        let removed = self
            .state
            .roster
            .remove(id)
            .ok_or(DispatchError::UnknownTrooper(id))?;
        self.persist_roster();
        self.project_command_squad();
        Ok(removed)
    }

    // Supply ---------------------------------------------------------------

    /// Create a stock location.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors.
    pub fn add_supply_location(
        &mut self,
        session: &Session,
        name: &str,
        amount: u32,
    ) -> Result<u64, DispatchError> {
        self.ensure_supervisor(session)?;
        let id = self.state.supply.add(name, amount);
        self.persist_supply();
        Ok(id)
    }

    /// Overwrite a stock location's amount.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors and unknown locations.
    pub fn set_supply_amount(
        &mut self,
        session: &Session,
        id: u64,
        amount: u32,
    ) -> Result<(), DispatchError> {
        self.ensure_supervisor(session)?;
        if !self.state.supply.set_amount(id, amount) {
            return Err(DispatchError::UnknownLocation(id));
        }
        self.persist_supply();
        Ok(())
    }

    /// Rename a stock location.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors and unknown locations.
    pub fn rename_supply_location(
        &mut self,
        session: &Session,
        id: u64,
        name: &str,
    ) -> Result<(), DispatchError> {
        self.ensure_supervisor(session)?;
        if !self.state.supply.rename(id, name) {
            return Err(DispatchError::UnknownLocation(id));
        }
        self.persist_supply();
        Ok(())
    }

    /// Delete a stock location.
    ///
    /// # Errors
    ///
    /// Rejects non-supervisors and unknown locations.
    pub fn remove_supply_location(
        &mut self,
        session: &Session,
        id: u64,
    ) -> Result<SupplyLocation, DispatchError> {
        self.ensure_supervisor(session)?;
        let removed = self
            .state
            .supply
            .remove(id)
            .ok_or(DispatchError::UnknownLocation(id))?;
        self.persist_supply();
        Ok(removed)
    }

    #[must_use]
    pub fn supply_total(&self) -> u64 {
        self.state.supply.total()
    }

    // Supervision ----------------------------------------------------------

    /// Take supervision of the depot, opening a service-archive entry.
    ///
    /// # Errors
    ///
    /// Rejects when a tenure is already active.
    pub fn take_supervision(
        &mut self,
        session: &Session,
        rank: Rank,
    ) -> Result<(), DispatchError> {
        let now = self.clock.now_label();
        if !self.state.tenure.begin(session, rank, &now) {
            return Err(DispatchError::TenureAlreadyHeld);
        }
        if let Err(err) = sync::open_archive_entry(&mut self.archive, &session.name, &now) {
            log::warn!("archive entry not opened: {err}");
        }
        self.persist_tenure();
        self.project_command_squad();
        Ok(())
    }

    /// End the active supervision tenure, closing its archive entry.
    ///
    /// # Errors
    ///
    /// Rejects when no tenure is active or the session does not own it.
    pub fn end_supervision(&mut self, session: &Session) -> Result<(), DispatchError> {
        if !self.state.tenure.active {
            return Err(DispatchError::NoActiveTenure);
        }
        self.ensure_supervisor(session)?;
        let now = self.clock.now_label();
        self.state.tenure.end(&now);
        if let Err(err) = sync::close_archive_entry(&mut self.archive, &now) {
            log::warn!("archive entry not closed: {err}");
        }
        self.persist_tenure();
        self.project_command_squad();
        Ok(())
    }

    /// Reassign tenure ownership to the session. Manual override: the
    /// caller is expected to have confirmed the takeover.
    ///
    /// # Errors
    ///
    /// Rejects when no tenure is active.
    pub fn force_recover_supervision(&mut self, session: &Session) -> Result<(), DispatchError> {
        if !self.state.tenure.force_recover(session) {
            return Err(DispatchError::NoActiveTenure);
        }
        self.persist_tenure();
        Ok(())
    }

    // Chat -----------------------------------------------------------------

    /// Post a message on the depot channel. Unguarded.
    pub fn post_chat_message(&mut self, session: &Session, body: &str) -> u64 {
        let now = self.clock.now_label();
        let id = self.state.chat.post(&session.name, body, &now);
        self.persist_chat();
        id
    }

    // Internals ------------------------------------------------------------

    fn ensure_supervisor(&self, session: &Session) -> Result<(), DispatchError> {
        if self.state.is_supervisor(session) {
            Ok(())
        } else {
            Err(DispatchError::NotSupervisor)
        }
    }

    fn project_command_squad(&mut self) {
        let officer = self.state.tenure.officer_name().map(str::to_string);
        let roster_len = self.state.roster.len();
        if let Err(err) = sync::sync_command_squad(&mut self.directory, officer.as_deref(), roster_len)
        {
            log::warn!("squad directory not updated: {err}");
        }
    }

    fn persist_fleet(&self) {
        if let Err(err) = self.storage.save_fleet(&self.state.fleet) {
            log::warn!("fleet record not persisted: {err}");
        }
    }

    fn persist_journal(&self) {
        if let Err(err) = self.storage.save_journal(&self.state.journal) {
            log::warn!("journal record not persisted: {err}");
        }
    }

    fn persist_supply(&self) {
        if let Err(err) = self.storage.save_supply(&self.state.supply) {
            log::warn!("supply record not persisted: {err}");
        }
    }

    fn persist_roster(&self) {
        if let Err(err) = self.storage.save_roster(&self.state.roster) {
            log::warn!("roster record not persisted: {err}");
        }
    }

    fn persist_tenure(&self) {
        if let Err(err) = self.storage.save_tenure(&self.state.tenure) {
            log::warn!("tenure record not persisted: {err}");
        }
    }

    fn persist_chat(&self) {
        if let Err(err) = self.storage.save_chat(&self.state.chat) {
            log::warn!("chat record not persisted: {err}");
        }
    }
}
