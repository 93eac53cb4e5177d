//! Output formatting - plaintext and JSON.

use serde_json::{json, Value};

use crate::check::{Finding, RULE};

/// Renders one finding as `file:line:col: severity: message`.
pub fn format_plain(finding: &Finding) -> String {
    format!(
        "{}:{}:{}: {}: {} [{}]",
        finding.file, finding.line, finding.column, finding.severity, finding.message, finding.rule_key
    )
}

/// Prints findings in plain text format.
pub fn print_plain(findings: &[Finding]) {
    if findings.is_empty() {
        println!("No deprecated API usages found.");
    } else {
        println!("DEPRECATED API USAGES ({}):", findings.len());
        for f in findings {
            println!("{}", format_plain(f));
        }
    }
}

/// Builds the JSON report document.
pub fn json_report(findings: &[Finding]) -> Value {
    json!({
        "rule": {
            "repository": RULE.repository_key,
            "key": RULE.rule_key,
            "name": RULE.name,
        },
        "count": findings.len(),
        "findings": findings,
    })
}

/// Prints findings in JSON format.
///
/// Falls back to the plain rendering if serialization fails.
pub fn print_json(findings: &[Finding]) {
    match serde_json::to_string_pretty(&json_report(findings)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::warn!(error = %e, "JSON serialization failed");
            print_plain(findings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Severity;

    fn sample() -> Finding {
        Finding {
            file: "src/Client.java".into(),
            line: 7,
            column: 9,
            rule_key: "CustomDeprecation".into(),
            severity: Severity::Minor,
            message: "This API is deprecated for this project. Use X".into(),
            owner_fqcn: "com.example.OldApi".into(),
            member: "oldMethod".into(),
        }
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(
            format_plain(&sample()),
            "src/Client.java:7:9: minor: This API is deprecated for this project. Use X [CustomDeprecation]"
        );
    }

    #[test]
    fn test_json_report() {
        let report = json_report(&[sample()]);
        assert_eq!(report["rule"]["repository"], "customdeprecation");
        assert_eq!(report["rule"]["key"], "CustomDeprecation");
        assert_eq!(report["count"], 1);
        assert_eq!(report["findings"][0]["severity"], "minor");
        assert_eq!(report["findings"][0]["owner_fqcn"], "com.example.OldApi");
    }
}
