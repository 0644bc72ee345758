//! Command entity <-> model mapper

use gate_core::entities::{Command, CommandStatus};
use gate_core::DomainError;

use crate::models::CommandModel;

use super::bad_column;

impl TryFrom<CommandModel> for Command {
    type Error = DomainError;

    fn try_from(model: CommandModel) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse::<CommandStatus>()
            .map_err(|_| bad_column("commands", "status", &model.status))?;

        Ok(Command {
            id: model.id,
            command_text: model.command_text,
            status,
            user_id: model.user_id,
            rule_id: model.rule_id,
            credits_deducted: model.credits_deducted,
            result: model.result,
            submitted_at: model.submitted_at,
            executed_at: model.executed_at,
        })
    }
}
