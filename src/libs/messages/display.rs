//! Display text for [`Message`].
//!
//! All user-facing text lives here so the commands and library code only
//! deal in typed message variants.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigReadFailed(error) => format!("Failed to read configuration, using defaults: {}", error),
            Message::InvalidConfigWorkday(configured, fallback) => format!(
                "Configured standard workday of {} hours is out of range, using {} hours",
                configured, fallback
            ),
            Message::ConfigModuleMatrix => "Matrix settings".to_string(),
            Message::ConfigModulePermissions => "Permission labels (leave the code empty to finish)".to_string(),

            // === REPORT MESSAGES ===
            Message::LoadingReport(path) => format!("Loading attendance data from {}", path),
            Message::ReportLoadFailed(error) => format!("Failed to load attendance data: {}", error),
            Message::MatrixHeader(start, end) => format!("Attendance matrix from {} to {}", start, end),
            Message::WeeklyReportHeader(start, end) => format!("Weekly hours from {} to {}", start, end),
            Message::CostCenterReportHeader(start, end) => format!("Cost center hours from {} to {}", start, end),
            Message::MarkingsHeader(start, end) => format!("Markings detail from {} to {}", start, end),
            Message::NoEmployees => "The report has no employees".to_string(),
            Message::EmployeeNotFound(id) => format!("Employee {} is not in the report", id),
            Message::CacheDisabled => "Pivot cache disabled for this run".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingData(data, format) => format!("Exporting {} in {} format...", data, format),
            Message::DataExported(path) => format!("Data exported successfully to: {}", path),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptStandardWorkday => "Standard workday length (hours)".to_string(),
            Message::InvalidStandardWorkday => "The workday must be longer than 0 and shorter than 24 hours".to_string(),
            Message::PromptCacheCapacity => "Pivot cache capacity (entries)".to_string(),
            Message::PromptCacheEnabled => "Enable the pivot cache?".to_string(),
            Message::PromptAllowOvernight => "Count check-outs before check-ins as overnight shifts?".to_string(),
            Message::PromptStrictRoster => "Reject facts for employees missing from the roster?".to_string(),
            Message::PromptPermissionCode => "Permission code".to_string(),
            Message::PromptPermissionLabel(code) => format!("Label for {}", code),
        };

        write!(f, "{}", text)
    }
}
