#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigReadFailed(String),
    InvalidConfigWorkday(f64, f64), // configured, fallback
    ConfigModuleMatrix,
    ConfigModulePermissions,

    // === REPORT MESSAGES ===
    LoadingReport(String), // path
    ReportLoadFailed(String),
    MatrixHeader(String, String),    // start, end
    WeeklyReportHeader(String, String), // start, end
    CostCenterReportHeader(String, String), // start, end
    MarkingsHeader(String, String),  // start, end
    NoEmployees,
    EmployeeNotFound(i64),
    CacheDisabled,

    // === EXPORT MESSAGES ===
    ExportingData(String, String), // data, format
    DataExported(String),          // path

    // === PROMPTS ===
    PromptSelectModules,
    PromptStandardWorkday,
    InvalidStandardWorkday,
    PromptCacheCapacity,
    PromptCacheEnabled,
    PromptAllowOvernight,
    PromptStrictRoster,
    PromptPermissionCode,
    PromptPermissionLabel(String), // code
}
