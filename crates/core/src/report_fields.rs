//! Query-parameter names understood by the report template.
//!
//! The outbound report URL is a template: its query string declares, by
//! parameter *name*, which fields the collector expects. Only names that
//! map to a [`ReportField`] are rewritten. Every other name is left
//! exactly as configured ([`ParamRole::PassThrough`]), and no parameter
//! is ever added that the template did not declare.

/// Parameter (and ingest form field) carrying the reporting process identity.
pub const PARAM_SERVER_ID: &str = "serverid";

/// Parameter (and ingest form field) carrying the CPU usage percentage.
pub const PARAM_CPU_USAGE: &str = "cpu";

/// A report field the template can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    ServerId,
    CpuUsage,
}

impl ReportField {
    pub const ALL: [ReportField; 2] = [ReportField::ServerId, ReportField::CpuUsage];

    pub fn param_name(self) -> &'static str {
        match self {
            ReportField::ServerId => PARAM_SERVER_ID,
            ReportField::CpuUsage => PARAM_CPU_USAGE,
        }
    }
}

/// How a template parameter is treated when a report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRole {
    /// Value is overwritten with the given field.
    Field(ReportField),
    /// Unknown name: name and value are kept untouched.
    PassThrough,
}

/// Classify a template parameter by its name (exact, case-sensitive match).
pub fn param_role(name: &str) -> ParamRole {
    ReportField::ALL
        .into_iter()
        .find(|field| field.param_name() == name)
        .map_or(ParamRole::PassThrough, ParamRole::Field)
}

/// Values available to fill a report template.
#[derive(Debug, Clone, Copy)]
pub struct ReportValues<'a> {
    pub server_id: &'a str,
    pub cpu_percent: f64,
}

impl ReportValues<'_> {
    /// Render the value for `field` as it appears in the query string.
    ///
    /// CPU usage uses the shortest decimal that round-trips (`42.5`, `42`).
    pub fn value_for(&self, field: ReportField) -> String {
        match field {
            ReportField::ServerId => self.server_id.to_string(),
            ReportField::CpuUsage => self.cpu_percent.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_map_to_fields() {
        assert_eq!(param_role("serverid"), ParamRole::Field(ReportField::ServerId));
        assert_eq!(param_role("cpu"), ParamRole::Field(ReportField::CpuUsage));
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(param_role("foo"), ParamRole::PassThrough);
        assert_eq!(param_role("CPU"), ParamRole::PassThrough);
        assert_eq!(param_role(""), ParamRole::PassThrough);
    }

    #[test]
    fn values_render_per_field() {
        let values = ReportValues {
            server_id: "abc-123",
            cpu_percent: 42.5,
        };
        assert_eq!(values.value_for(ReportField::ServerId), "abc-123");
        assert_eq!(values.value_for(ReportField::CpuUsage), "42.5");
    }

    #[test]
    fn whole_percentages_render_without_fraction() {
        let values = ReportValues {
            server_id: "x",
            cpu_percent: 12.0,
        };
        assert_eq!(values.value_for(ReportField::CpuUsage), "12");
    }
}
