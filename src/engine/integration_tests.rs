// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::ScriptedChannel;
use crate::config::{ComponentTable, Config, RunRequest};
use crate::engine::{AreaNo, AreaValidity, InspectionContext, TriggerState, Verdict};
use crate::errors::InspectionError;
use crate::traits::CommandChannel;

/// Integration tests for the full inspection cycle over a scripted reader
#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
bank: 1
reader:
  host: 127.0.0.1
trigger:
  retry_count: 2
  retry_delay_ms: 0
luminaries:
  LX-200:
    - leds:
        "7001": [{x1: 10, y1: 10, x2: 100, y2: 100}]
      optics: {}
    - leds:
        "7001": [{x1: 10, y1: 10, x2: 100, y2: 100}]
      optics:
        "6001": [{x1: 200, y1: 10, x2: 300, y2: 100}]
"#;

    fn config() -> Config {
        serde_yaml::from_str(CONFIG).unwrap()
    }

    fn request(components: &[&str], bank: Option<u8>) -> RunRequest {
        let mut table = ComponentTable::new();
        for component in components {
            table.add(component.parse().unwrap()).unwrap();
        }
        RunRequest {
            luminary: "LX-200".to_string(),
            bank,
            components: table,
        }
    }

    fn area(n: u16) -> AreaNo {
        AreaNo::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_all_codes_match() {
        let context =
            InspectionContext::prepare(&config(), &request(&["7001/123", "6001/999"], None)).unwrap();
        let mut channel = ScriptedChannel::new();
        channel.reply("LON", "ABC123:001|XYZ999:002");

        let report = context.run(&mut channel).await.unwrap();

        assert_eq!(report.verdict(), Verdict::Ok);
        assert_eq!(report.trigger.state, TriggerState::Fulfilled);
        assert_eq!(
            channel.commands(),
            vec![
                "DEFAULTDAREA,0",
                "WD,001,0010001001000100",
                "WD,002,0200001003000100",
                "WP,250,2",
                "WP,253,2",
                "WP,251,1",
                "LON,01",
            ]
        );
        assert!(channel.is_closed());
    }

    #[tokio::test]
    async fn test_wrong_material_is_nok_with_one_diagnostic() {
        let context =
            InspectionContext::prepare(&config(), &request(&["7001/123", "6001/999"], None)).unwrap();
        let mut channel = ScriptedChannel::new();
        channel.reply("LON", "ABC:001|XYZ999:002");

        let report = context.run(&mut channel).await.unwrap();

        assert_eq!(report.verdict().to_string(), "NOK");
        assert_eq!(
            report.verdict.diagnostics(),
            vec![
                "Failed check for component [7001/123/1] in area [10x10 100x100]: invalid code found [ABC]."
            ]
        );
        assert_eq!(report.verdict.failures[0].area_no, area(1));
    }

    #[tokio::test]
    async fn test_retries_until_every_area_is_read() {
        let context =
            InspectionContext::prepare(&config(), &request(&["7001/123", "6001/999"], None)).unwrap();
        let mut channel = ScriptedChannel::new();
        channel.reply("LON", ":001|XYZ999:002");
        channel.reply("LON", "ABC123:001|XYZ999:002");
        channel.reply("LON", "SHOULD-NOT:001");

        let report = context.run(&mut channel).await.unwrap();

        assert_eq!(report.trigger.attempts, 2);
        assert_eq!(report.trigger.state, TriggerState::Fulfilled);
        assert_eq!(channel.count("LON"), 2);
        assert!(report.verdict.is_ok());
    }

    #[tokio::test]
    async fn test_exhausted_retries_fall_through_to_verdict() {
        let context =
            InspectionContext::prepare(&config(), &request(&["7001/123", "6001/999"], None)).unwrap();
        let mut channel = ScriptedChannel::new();
        channel.reply("LON", "ABC123:001");

        let report = context.run(&mut channel).await.unwrap();

        assert_eq!(report.trigger.state, TriggerState::ExhaustedRetries);
        assert_eq!(channel.count("LON"), 3);
        assert_eq!(report.verdict(), Verdict::Nok);
        assert_eq!(
            report.verdict.validity(area(2)),
            Some(&AreaValidity::NotFound)
        );
    }

    #[tokio::test]
    async fn test_later_empty_read_replaces_good_read_by_default() {
        let context =
            InspectionContext::prepare(&config(), &request(&["7001/123", "6001/999"], None)).unwrap();
        let mut channel = ScriptedChannel::new();
        channel.reply("LON", "ABC123:001");
        channel.reply("LON", ":001");
        channel.reply("LON", ":001|XYZ999:002");

        let report = context.run(&mut channel).await.unwrap();

        assert_eq!(report.verdict(), Verdict::Nok);
        assert_eq!(report.verdict.validity(area(1)), Some(&AreaValidity::NotFound));
    }

    #[tokio::test]
    async fn test_keep_non_empty_combines_attempts() {
        let mut config = config();
        config.trigger.overwrite = crate::config::OverwritePolicy::KeepNonEmpty;

        let context =
            InspectionContext::prepare(&config, &request(&["7001/123", "6001/999"], None)).unwrap();
        let mut channel = ScriptedChannel::new();
        channel.reply("LON", "ABC123:001");
        channel.reply("LON", ":001|XYZ999:002");

        let report = context.run(&mut channel).await.unwrap();

        assert_eq!(report.verdict(), Verdict::Ok);
        assert_eq!(report.trigger.attempts, 2);
    }

    #[tokio::test]
    async fn test_request_bank_overrides_configured_bank() {
        let context =
            InspectionContext::prepare(&config(), &request(&["7001/123"], Some(7))).unwrap();
        let mut channel = ScriptedChannel::new();
        channel.reply("LON", "ABC123:001");

        context.run(&mut channel).await.unwrap();

        assert_eq!(channel.commands().last(), Some(&"LON,07"));
    }

    #[tokio::test]
    async fn test_bank_zero_omits_bank_parameter() {
        let context =
            InspectionContext::prepare(&config(), &request(&["7001/123"], Some(0))).unwrap();
        let mut channel = ScriptedChannel::new();
        channel.reply("LON", "ABC123:001");

        context.run(&mut channel).await.unwrap();

        assert_eq!(channel.commands().last(), Some(&"LON"));
    }

    #[tokio::test]
    async fn test_configuration_failure_is_fatal_and_closes_channel() {
        let context =
            InspectionContext::prepare(&config(), &request(&["7001/123", "6001/999"], None)).unwrap();
        let mut channel = ScriptedChannel::new();
        channel.reject("WP", "05");

        let err = context.run(&mut channel).await.unwrap_err();

        assert!(matches!(err, InspectionError::Command { ref command, .. } if command == "WP,250,2"));
        assert_eq!(err.kind(), "device");
        assert_eq!(channel.count("LON"), 0);
        assert_eq!(channel.last_error(), Some("05"));
        assert!(channel.is_closed());
    }

    #[tokio::test]
    async fn test_trigger_failures_are_not_fatal() {
        let context =
            InspectionContext::prepare(&config(), &request(&["7001/123"], None)).unwrap();
        let mut channel = ScriptedChannel::new();
        channel.reject("LON", "02");

        let report = context.run(&mut channel).await.unwrap();

        assert_eq!(report.trigger.attempts, 3);
        assert_eq!(report.verdict(), Verdict::Nok);
        assert!(channel.is_closed());
    }

    #[test]
    fn test_mismatches_surface_before_any_device_access() {
        let config = config();

        let err = InspectionContext::prepare(&config, &request(&["7001/123", "6001/999", "6002/1"], None))
            .unwrap_err();
        assert!(matches!(
            err,
            InspectionError::NoMatchingProfile { leds: 1, optics: 2, .. }
        ));

        let mut unknown = request(&["7001/123"], None);
        unknown.luminary = "LX-300".to_string();
        assert!(matches!(
            InspectionContext::prepare(&config, &unknown),
            Err(InspectionError::UnknownLuminary { .. })
        ));

        // counts match the second profile but the optics item differs
        let err = InspectionContext::prepare(&config, &request(&["7001/123", "6002/999"], None))
            .unwrap_err();
        assert!(matches!(err, InspectionError::LayoutMismatch { .. }));
        assert!(err.to_string().contains("No optics component with item [6001]."));
    }

    #[test]
    fn test_prepare_assigns_first_matching_profile() {
        let context =
            InspectionContext::prepare(&config(), &request(&["7001/123"], None)).unwrap();
        assert_eq!(context.results().len(), 1);
        assert_eq!(context.luminary(), "LX-200");
        assert_eq!(context.trigger().command().to_string(), "LON,01");
    }
}
