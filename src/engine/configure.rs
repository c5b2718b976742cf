// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Writes the assigned areas to the reader.
//!
//! The sequence is fixed: clear all areas, one `WD` per area in area-number
//! order, then the code counts and the reduced-detection switch. A single
//! failed command aborts the whole configuration; the reader is reconfigured
//! from scratch on the next run anyway.

use tracing::Instrument;

use crate::engine::commands::DeviceCommand;
use crate::engine::AreaResults;
use crate::errors::InspectionError;
use crate::observability::messages::inspection::ConfiguringReader;
use crate::observability::messages::StructuredLog;
use crate::traits::CommandChannel;

/// Builds the configuration command sequence for `results`.
pub fn configuration_commands(results: &AreaResults) -> Vec<DeviceCommand> {
    let count = results.len();
    let mut commands = Vec::with_capacity(count + 4);

    commands.push(DeviceCommand::ClearAreas);
    commands.extend(results.iter().map(|(area_no, result)| DeviceCommand::SetArea {
        area_no,
        area: result.area,
    }));
    commands.push(DeviceCommand::CodesToRead(count));
    commands.push(DeviceCommand::MaxDataMatrixCodes(count));
    commands.push(DeviceCommand::AllowReducedDetection);

    commands
}

/// Sends one command, mapping any channel failure to a fatal error.
pub(crate) async fn send<C>(channel: &mut C, command: &DeviceCommand) -> Result<String, InspectionError>
where
    C: CommandChannel + ?Sized,
{
    let command = command.to_string();
    channel
        .exec(&command)
        .await
        .map_err(|source| InspectionError::Command { command, source })
}

/// Configures the reader for the assigned areas.
pub async fn configure_reader<C>(channel: &mut C, results: &AreaResults) -> Result<(), InspectionError>
where
    C: CommandChannel + ?Sized,
{
    let message = ConfiguringReader {
        areas: results.len(),
    };
    message.log();

    async {
        for command in configuration_commands(results) {
            send(channel, &command).await?;
        }
        Ok(())
    }
    .instrument(message.span("configure_reader"))
    .await
}
