//! Command sender: writes one six-byte payload into output report 0x10 and
//! commits the report to the device.
//!
//! Protocol, per payload:
//!   1. HIDIOCSUSAGE six times, one usage per payload byte, in index order
//!   2. HIDIOCSREPORT once to send the assembled report
//!
//! There is no acknowledgement and no rollback. A failed ioctl aborts the
//! remaining sequence and leaves any earlier payloads applied.

use crate::error::Result;
use crate::hiddev::{report_type, ReportInfo, UsageRef, HIDIOCSREPORT, HIDIOCSUSAGE};
use crate::payload::CommandPayload;
use crate::transport::{issue, HiddevTransport};
use tracing::debug;

/// Output report carrying vendor commands.
pub const COMMAND_REPORT_ID: u32 = 0x10;

/// Vendor-defined usage of each payload slot.
pub const COMMAND_USAGE_CODE: u32 = 0xFF00_0001;

/// Usage-set record for one byte of a command payload.
pub fn usage_for(usage_index: usize, value: u8) -> UsageRef {
    UsageRef {
        report_type: report_type::OUTPUT,
        report_id: COMMAND_REPORT_ID,
        field_index: 0,
        usage_index: usage_index as u32,
        usage_code: COMMAND_USAGE_CODE,
        value: i32::from(value),
    }
}

/// Report-commit record for the command report.
pub fn commit_report() -> ReportInfo {
    ReportInfo {
        report_type: report_type::OUTPUT,
        report_id: COMMAND_REPORT_ID,
        num_fields: 1,
    }
}

/// Send one payload: six usage-sets, then one report commit.
pub fn send_command(transport: &dyn HiddevTransport, payload: &CommandPayload) -> Result<()> {
    debug!(payload = %payload, "Sending command");

    for (usage_index, &value) in payload.bytes().iter().enumerate() {
        let mut uref = usage_for(usage_index, value);
        issue(transport, HIDIOCSUSAGE, &mut uref)?;
    }

    let mut report = commit_report();
    issue(transport, HIDIOCSREPORT, &mut report)?;
    debug!("Report committed");
    Ok(())
}

/// Send each payload in order, stopping at the first failure.
pub fn send_all(transport: &dyn HiddevTransport, payloads: &[CommandPayload]) -> Result<()> {
    for (i, payload) in payloads.iter().enumerate() {
        debug!(step = i + 1, total = payloads.len(), "Applying payload");
        send_command(transport, payload)?;
    }
    Ok(())
}
