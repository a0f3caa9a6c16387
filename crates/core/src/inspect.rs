//! Read-only report layout queries.
//!
//! Used to show how the kernel sees the command report before anything is
//! written to it. None of these change device state.

use crate::error::Result;
use crate::hiddev::{
    CollectionInfo, FieldInfo, ReportInfo, HIDIOCGCOLLECTIONINFO, HIDIOCGFIELDINFO,
    HIDIOCGREPORTINFO,
};
use crate::transport::{issue, HiddevTransport};
use serde::Serialize;

/// Report description for one report ID (HIDIOCGREPORTINFO).
pub fn read_report_info(
    transport: &dyn HiddevTransport,
    report_type: u32,
    report_id: u32,
) -> Result<ReportInfo> {
    let mut info = ReportInfo {
        report_type,
        report_id,
        num_fields: 0,
    };
    issue(transport, HIDIOCGREPORTINFO, &mut info)?;
    Ok(info)
}

/// Field description within a report (HIDIOCGFIELDINFO).
pub fn read_field_info(
    transport: &dyn HiddevTransport,
    report_type: u32,
    report_id: u32,
    field_index: u32,
) -> Result<FieldInfo> {
    let mut info = FieldInfo {
        report_type,
        report_id,
        field_index,
        ..Default::default()
    };
    issue(transport, HIDIOCGFIELDINFO, &mut info)?;
    Ok(info)
}

/// Application collection by index (HIDIOCGCOLLECTIONINFO).
pub fn read_collection_info(transport: &dyn HiddevTransport, index: u32) -> Result<CollectionInfo> {
    let mut info = CollectionInfo {
        index,
        ..Default::default()
    };
    issue(transport, HIDIOCGCOLLECTIONINFO, &mut info)?;
    Ok(info)
}

/// A report together with all of its fields.
#[derive(Debug, Clone, Serialize)]
pub struct ReportLayout {
    pub report: ReportInfo,
    pub fields: Vec<FieldInfo>,
}

/// Read a report and every field it declares.
pub fn read_report_layout(
    transport: &dyn HiddevTransport,
    report_type: u32,
    report_id: u32,
) -> Result<ReportLayout> {
    let report = read_report_info(transport, report_type, report_id)?;
    let fields = (0..report.num_fields)
        .map(|i| read_field_info(transport, report.report_type, report.report_id, i))
        .collect::<Result<Vec<_>>>()?;
    Ok(ReportLayout { report, fields })
}
