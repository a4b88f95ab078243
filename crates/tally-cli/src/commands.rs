//! Command dispatch: maps each parsed command to tracker calls and writes
//! the rendered result.

use std::io::Write;

use tally_core::{ActionDraft, Clock, MultiplierDraft, Tracker};
use tally_store::StateSlot;

use crate::cli::{ActionCommand, BoostCommand, Command, ResetTarget};
use crate::error::CliError;
use crate::render;

/// Run `command` against `tracker`, writing human-readable output to `out`.
pub fn run<S, C, W>(command: Command, tracker: &mut Tracker<S, C>, out: &mut W) -> Result<(), CliError>
where
    S: StateSlot,
    C: Clock,
    W: Write,
{
    match command {
        Command::Today => {
            let view = tracker.today()?;
            let state = tracker.state();
            writeln!(out, "{}", render::today(&view, &state.actions, &state.multipliers))?;
        }
        Command::Log => {
            writeln!(out, "{}", render::history(&tracker.history()))?;
        }
        Command::Tap { action } => {
            let id = tracker.resolve_action(&action)?;
            let activation = tracker.record_activation(&id)?;
            let name = tracker
                .state()
                .action(&id)
                .map_or_else(|| id.to_string(), |a| a.name.clone());
            let day_total = tracker
                .state()
                .bucket(activation.date)
                .map(|b| b.total_points)
                .unwrap_or_default();
            writeln!(out, "{}", render::activation(&activation, &name, day_total))?;
        }
        Command::Action { command } => run_action(command, tracker, out)?,
        Command::Boost { command } => run_boost(command, tracker, out)?,
        Command::Reset { target, yes } => {
            confirm(yes, "reset")?;
            match target {
                ResetTarget::Actions => {
                    tracker.reset_actions_to_default()?;
                    writeln!(out, "Actions reset to defaults; daily scores kept.")?;
                }
                ResetTarget::Boosts => {
                    tracker.reset_multipliers_to_default()?;
                    writeln!(out, "Boosts reset to defaults; daily scores kept.")?;
                }
            }
        }
        Command::Clear { yes } => {
            confirm(yes, "clear")?;
            tracker.clear_all()?;
            writeln!(out, "All actions, boosts and daily scores cleared.")?;
        }
        Command::Verify => {
            let anomalies = tracker.verify();
            let days = tracker.state().daily_totals.len();
            writeln!(out, "{}", render::anomalies(&anomalies, days))?;
            if !anomalies.is_empty() {
                return Err(CliError::Unbalanced {
                    count: anomalies.len(),
                });
            }
        }
    }
    Ok(())
}

fn run_action<S, C, W>(command: ActionCommand, tracker: &mut Tracker<S, C>, out: &mut W) -> Result<(), CliError>
where
    S: StateSlot,
    C: Clock,
    W: Write,
{
    match command {
        ActionCommand::List => {
            writeln!(out, "{}", render::actions(&tracker.state().actions))?;
        }
        ActionCommand::Add {
            name,
            points,
            category,
            color,
        } => {
            let action = tracker.upsert_action(ActionDraft {
                id: None,
                name,
                base_points: points,
                category,
                color,
            })?;
            writeln!(out, "Added action {} [{}]", action.name, action.id)?;
        }
        ActionCommand::Edit {
            action,
            name,
            points,
            category,
            color,
        } => {
            let id = tracker.resolve_action(&action)?;
            let Some(current) = tracker.state().action(&id).cloned() else {
                return Err(tally_core::TrackerError::NotFound {
                    kind: tally_core::EntityKind::Action,
                    id: id.into_inner(),
                }
                .into());
            };
            let action = tracker.upsert_action(ActionDraft {
                id: Some(current.id),
                name: name.unwrap_or(current.name),
                base_points: points.unwrap_or(current.base_points),
                category: category.unwrap_or(current.category),
                color: color.unwrap_or(current.color),
            })?;
            writeln!(out, "Updated action {} [{}]", action.name, action.id)?;
        }
        ActionCommand::Rm { action, yes } => {
            let id = tracker.resolve_action(&action)?;
            confirm(yes, "action rm")?;
            let removed = tracker.remove_action(&id)?;
            writeln!(out, "Removed action {}; past days are unchanged.", removed.name)?;
        }
        ActionCommand::Move { action, position } => {
            let id = tracker.resolve_action(&action)?;
            let len = tracker.state().actions.len();
            let to = target_index(position, len)?;
            let from = tracker.state().action_position(&id).unwrap_or(to);
            tracker.reorder_actions(from, to)?;
            writeln!(out, "{}", render::actions(&tracker.state().actions))?;
        }
    }
    Ok(())
}

fn run_boost<S, C, W>(command: BoostCommand, tracker: &mut Tracker<S, C>, out: &mut W) -> Result<(), CliError>
where
    S: StateSlot,
    C: Clock,
    W: Write,
{
    match command {
        BoostCommand::List => {
            writeln!(out, "{}", render::multipliers(&tracker.state().multipliers))?;
        }
        BoostCommand::Toggle { multiplier } => {
            let id = tracker.resolve_multiplier(&multiplier)?;
            let active = tracker.toggle_multiplier(&id)?;
            let product = tracker.today()?.multiplier_product;
            let name = tracker
                .state()
                .multiplier(&id)
                .map_or(multiplier, |m| m.name.clone());
            let state = if active { "on" } else { "off" };
            writeln!(
                out,
                "Boost {name} is {state}; current multiplier {}",
                render::factor(product)
            )?;
        }
        BoostCommand::Add { name, value, color } => {
            let multiplier = tracker.upsert_multiplier(MultiplierDraft {
                id: None,
                name,
                value,
                color,
            })?;
            writeln!(out, "Added boost {} [{}]", multiplier.name, multiplier.id)?;
        }
        BoostCommand::Edit {
            multiplier,
            name,
            value,
            color,
        } => {
            let id = tracker.resolve_multiplier(&multiplier)?;
            let Some(current) = tracker.state().multiplier(&id).cloned() else {
                return Err(tally_core::TrackerError::NotFound {
                    kind: tally_core::EntityKind::Multiplier,
                    id: id.into_inner(),
                }
                .into());
            };
            let multiplier = tracker.upsert_multiplier(MultiplierDraft {
                id: Some(current.id),
                name: name.unwrap_or(current.name),
                value: value.unwrap_or(current.value),
                color: color.unwrap_or(current.color),
            })?;
            writeln!(out, "Updated boost {} [{}]", multiplier.name, multiplier.id)?;
        }
        BoostCommand::Rm { multiplier, yes } => {
            let id = tracker.resolve_multiplier(&multiplier)?;
            confirm(yes, "boost rm")?;
            let removed = tracker.remove_multiplier(&id)?;
            writeln!(out, "Removed boost {}", removed.name)?;
        }
        BoostCommand::Move {
            multiplier,
            position,
        } => {
            let id = tracker.resolve_multiplier(&multiplier)?;
            let len = tracker.state().multipliers.len();
            let to = target_index(position, len)?;
            let from = tracker.state().multiplier_position(&id).unwrap_or(to);
            tracker.reorder_multipliers(from, to)?;
            writeln!(out, "{}", render::multipliers(&tracker.state().multipliers))?;
        }
    }
    Ok(())
}

const fn confirm(yes: bool, command: &'static str) -> Result<(), CliError> {
    if yes {
        Ok(())
    } else {
        Err(CliError::ConfirmationRequired { command })
    }
}

/// Convert a 1-based position into an index.
fn target_index(position: usize, len: usize) -> Result<usize, CliError> {
    position
        .checked_sub(1)
        .filter(|index| *index < len)
        .ok_or(CliError::InvalidPosition { position, len })
}
