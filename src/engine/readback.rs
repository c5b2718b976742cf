// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reads the areas currently configured on the reader.

use crate::config::consts::MAX_AREAS;
use crate::config::AreaSpec;
use crate::engine::commands::DeviceCommand;
use crate::engine::AreaNo;
use crate::errors::{ChannelError, InspectionError};
use crate::traits::CommandChannel;

/// Extracts the rectangle from an `OK,RD,<16 digits>` response.
pub fn parse_area_response(response: &str) -> Option<AreaSpec> {
    let fields: Vec<&str> = response.trim().split(',').collect();
    match fields.as_slice() {
        [_, _, rect] => AreaSpec::from_command(rect),
        _ => None,
    }
}

/// Queries areas `001` upwards until the reader reports an unset area.
///
/// A rejected `RD` aborts the read-back; an unparsable or all-zero rectangle
/// marks the end of the configured areas.
pub async fn read_areas<C>(channel: &mut C) -> Result<Vec<(AreaNo, AreaSpec)>, InspectionError>
where
    C: CommandChannel + ?Sized,
{
    let mut areas = Vec::new();

    for number in 1..=MAX_AREAS as u16 {
        let Some(area_no) = AreaNo::new(number) else {
            break;
        };
        let command = DeviceCommand::ReadArea(area_no).to_string();

        let response = match channel.exec(&command).await {
            Ok(response) => response,
            Err(ChannelError::Device { code, .. }) => {
                return Err(InspectionError::AreaReadback {
                    response: format!("ER,RD,{}", code),
                })
            }
            Err(source) => return Err(InspectionError::Command { command, source }),
        };

        match parse_area_response(&response) {
            Some(area) if !area.is_zero() => areas.push((area_no, area)),
            _ => break,
        }
    }

    Ok(areas)
}
