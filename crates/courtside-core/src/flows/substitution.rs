//! Substitution panel selection model.
//!
//! Two selection slots: a bench player and a court position. As soon as
//! both are filled the panel emits exactly one command and clears both:
//! a swap when the court position is occupied, an add when it is empty.
//! Drag-and-drop is the same as selecting the bench player and tapping the
//! court position.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::backend::DataBackend;
use crate::error::{CourtsideError, CourtsideResult};
use crate::types::{GameId, PlayerId, PlayerStat};

/// Players on the court per team
pub const COURT_SLOTS: usize = 5;

/// What the panel asks the backend to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionCommand {
    Swap { out: PlayerId, incoming: PlayerId },
    Add { player: PlayerId, slot: usize },
}

/// User input on the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionEvent {
    TapBench(PlayerId),
    TapCourt(usize),
    Drop { player: PlayerId, slot: usize },
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionPanel {
    court: [Option<PlayerId>; COURT_SLOTS],
    bench: Vec<PlayerId>,
    fouled_out: HashSet<PlayerId>,
    selected_bench: Option<PlayerId>,
    selected_court: Option<usize>,
}

impl SubstitutionPanel {
    /// Build the panel from the backend's roster: on-court players fill the
    /// slots in roster order, everyone else sits on the bench.
    pub fn from_roster(players: &[PlayerStat]) -> Self {
        let mut panel = Self::default();
        let mut slots = panel.court.iter_mut();
        for player in players {
            if player.fouled_out {
                panel.fouled_out.insert(player.player_id.clone());
            }
            let slot = if player.is_on_court {
                slots.next()
            } else {
                None
            };
            match slot {
                Some(slot) => *slot = Some(player.player_id.clone()),
                None => panel.bench.push(player.player_id.clone()),
            }
        }
        panel
    }

    pub fn court(&self) -> &[Option<PlayerId>; COURT_SLOTS] {
        &self.court
    }

    pub fn bench(&self) -> &[PlayerId] {
        &self.bench
    }

    pub fn selected_bench(&self) -> Option<&PlayerId> {
        self.selected_bench.as_ref()
    }

    pub fn selected_court(&self) -> Option<usize> {
        self.selected_court
    }

    pub fn open_slots(&self) -> usize {
        self.court.iter().filter(|s| s.is_none()).count()
    }

    fn clear_selection(&mut self) {
        self.selected_bench = None;
        self.selected_court = None;
    }

    fn check_slot(slot: usize) -> CourtsideResult<()> {
        if slot >= COURT_SLOTS {
            return Err(CourtsideError::InvalidTransition(format!(
                "court slot {} does not exist",
                slot
            )));
        }
        Ok(())
    }

    fn check_bench_player(&self, player: &PlayerId) -> CourtsideResult<()> {
        if !self.bench.contains(player) {
            return Err(CourtsideError::InvalidTransition(format!(
                "{} is not on the bench",
                player
            )));
        }
        if self.fouled_out.contains(player) {
            return Err(CourtsideError::InvalidTransition(format!(
                "{} has fouled out",
                player
            )));
        }
        Ok(())
    }

    /// Command for putting `incoming` into `slot`
    fn command_for(&self, incoming: PlayerId, slot: usize) -> SubstitutionCommand {
        match &self.court[slot] {
            Some(out) => SubstitutionCommand::Swap {
                out: out.clone(),
                incoming,
            },
            None => SubstitutionCommand::Add {
                player: incoming,
                slot,
            },
        }
    }

    /// Feed one event. Returns the command to send once both slots are
    /// filled; selections are cleared whenever a command is emitted.
    pub fn handle(
        &mut self,
        event: SubstitutionEvent,
    ) -> CourtsideResult<Option<SubstitutionCommand>> {
        let command = match event {
            SubstitutionEvent::TapBench(player) => {
                self.check_bench_player(&player)?;
                match self.selected_court {
                    Some(slot) => Some(self.command_for(player, slot)),
                    None => {
                        if self.selected_bench.as_ref() == Some(&player) {
                            self.selected_bench = None;
                        } else {
                            self.selected_bench = Some(player);
                        }
                        None
                    }
                }
            }
            SubstitutionEvent::TapCourt(slot) => {
                Self::check_slot(slot)?;
                match self.selected_bench.clone() {
                    Some(player) => Some(self.command_for(player, slot)),
                    None => {
                        if self.selected_court == Some(slot) {
                            self.selected_court = None;
                        } else {
                            self.selected_court = Some(slot);
                        }
                        None
                    }
                }
            }
            SubstitutionEvent::Drop { player, slot } => {
                Self::check_slot(slot)?;
                self.check_bench_player(&player)?;
                Some(self.command_for(player, slot))
            }
            SubstitutionEvent::Clear => {
                self.clear_selection();
                None
            }
        };
        if let Some(command) = &command {
            debug!(?command, "Substitution ready");
            self.clear_selection();
        }
        Ok(command)
    }

    /// Reflect a command the backend accepted.
    pub fn apply(&mut self, command: &SubstitutionCommand) {
        match command {
            SubstitutionCommand::Swap { out, incoming } => {
                if let Some(slot) = self.court.iter_mut().find(|s| s.as_ref() == Some(out)) {
                    *slot = Some(incoming.clone());
                }
                self.bench.retain(|p| p != incoming);
                self.bench.push(out.clone());
            }
            SubstitutionCommand::Add { player, slot } => {
                if let Some(s) = self.court.get_mut(*slot) {
                    *s = Some(player.clone());
                }
                self.bench.retain(|p| p != player);
            }
        }
    }
}

/// Send a command to the backend; on success mirror it locally.
pub async fn execute_substitution(
    backend: &dyn DataBackend,
    game_id: &GameId,
    panel: &mut SubstitutionPanel,
    command: SubstitutionCommand,
) -> CourtsideResult<()> {
    match &command {
        SubstitutionCommand::Swap { out, incoming } => {
            backend.swap_players(game_id, out, incoming).await?;
            info!(%out, %incoming, "Substitution made");
        }
        SubstitutionCommand::Add { player, .. } => {
            backend.add_to_court(game_id, player).await?;
            info!(%player, "Player added to court");
        }
    }
    panel.apply(&command);
    Ok(())
}
