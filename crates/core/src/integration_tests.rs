//! Integration tests: exercise the full flow against a simulated G5.
//!
//! The mock answers HIDIOCGDEVINFO with a configurable identity and records
//! every ioctl, so these tests check the complete identify→validate→send
//! sequence the way the CLI drives it.

#[cfg(test)]
mod tests {
    use crate::command;
    use crate::error::Error;
    use crate::hiddev::{MouseIdentity, UsageRef, HIDIOCGDEVINFO, HIDIOCSREPORT, HIDIOCSUSAGE};
    use crate::identify::{self, MouseModel};
    use crate::payload::{CommandPayload, Dpi, LedPattern, SpeedButtons};
    use crate::record::unpack;
    use crate::settings::Settings;
    use crate::transport::mock::MockTransport;
    use crate::{pids, LOGITECH_VID};

    /// Create a mock hiddev node reporting the given product ID.
    fn create_mock_mouse(vendor_id: u16, product_id: u16) -> MockTransport {
        let mock = MockTransport::new();
        mock.on_request(
            HIDIOCGDEVINFO,
            &MouseIdentity {
                bus_type: 3,
                bus_number: 1,
                device_number: 7,
                interface_number: 0,
                vendor_id,
                product_id,
                version: 0x2700,
                application_count: 2,
            },
        );
        mock
    }

    /// Same sequence the CLI runs for `apply`.
    fn apply(mock: &MockTransport, payloads: &[CommandPayload]) -> crate::error::Result<MouseModel> {
        let (_, model) = identify::identify_supported(mock)?;
        command::send_all(mock, payloads)?;
        Ok(model)
    }

    #[test]
    fn dpi_1600_on_second_generation_g5() {
        let mock = create_mock_mouse(LOGITECH_VID, pids::G5_SECOND);
        let payload = CommandPayload::new([0x00, 0x80, 0x63, 0x82, 0x00, 0x00]);

        let model = apply(&mock, &[payload]).unwrap();
        assert_eq!(model, MouseModel::G5Second);

        let calls = mock.calls();
        assert_eq!(calls.len(), 1 + 6 + 1);
        assert_eq!(calls[0].request, HIDIOCGDEVINFO);
        for i in 0..6 {
            let call = &calls[1 + i];
            assert_eq!(call.request, HIDIOCSUSAGE);
            let uref: UsageRef = unpack(&call.buf).unwrap();
            assert_eq!(uref.usage_index, i as u32);
            assert_eq!(uref.value, i32::from(payload.bytes()[i]));
        }
        assert_eq!(calls[7].request, HIDIOCSREPORT);
    }

    #[test]
    fn unknown_product_halts_before_any_write() {
        let mock = create_mock_mouse(LOGITECH_VID, 49999);
        let err = apply(&mock, &[Dpi::Dpi800.payload()]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDevice { product: 49999, .. }));

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].request, HIDIOCGDEVINFO);
    }

    #[test]
    fn foreign_vendor_halts_before_any_write() {
        let mock = create_mock_mouse(0x1532, pids::G9);
        assert!(apply(&mock, &[Dpi::Dpi800.payload()]).is_err());
        assert!(mock.calls().iter().all(|c| c.request == HIDIOCGDEVINFO));
    }

    #[test]
    fn full_settings_plan_on_g9() {
        let mock = create_mock_mouse(LOGITECH_VID, pids::G9);
        let settings = Settings {
            dpi: Some(Dpi::Dpi2000),
            led: Some(LedPattern::One),
            speed_buttons: Some(SpeedButtons::Disabled),
            ..Default::default()
        };

        apply(&mock, &settings.payloads()).unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1 + 3 * 7);
        let commits: Vec<usize> = calls
            .iter()
            .enumerate()
            .filter(|(_, c)| c.request == HIDIOCSREPORT)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(commits, vec![7, 14, 21]);

        let byte3 = |i: usize| unpack::<UsageRef>(&calls[i].buf).unwrap().value;
        assert_eq!(byte3(4), 0x83);
        assert_eq!(byte3(11), 0x11);
        assert_eq!(byte3(18), 0x00);
    }

    #[test]
    fn ioctl_failure_leaves_earlier_payloads_applied() {
        let mock = create_mock_mouse(LOGITECH_VID, pids::G7);
        // devinfo + first payload (7) succeed, third usage of the LED payload fails
        mock.fail_at(1 + 7 + 2);

        let err = apply(&mock, &Settings::default().payloads()).unwrap_err();
        assert!(matches!(err, Error::Ioctl { .. }));

        let calls = mock.calls();
        assert_eq!(calls.len(), 11);
        assert_eq!(calls[7].request, HIDIOCSREPORT);
        assert_eq!(
            calls.iter().filter(|c| c.request == HIDIOCSREPORT).count(),
            1
        );
    }
}
