//! Groovy schema script generation for the downstream scripted connector.
//!
//! The template text is a compatibility contract with the OpenICF connector
//! runtime: its structure must be reproduced verbatim, with only header and
//! permission-column names substituted. Keep every template change here.

use std::{fmt::Write as _, fs, path::PathBuf};

use anyhow::{Context, Result};
use log::info;

const SCHEMA_PRELUDE: &str = r#"import org.forgerock.openicf.connectors.groovy.OperationType
import org.forgerock.openicf.connectors.groovy.ScriptedConfiguration
import org.identityconnectors.common.logging.Log
import org.identityconnectors.framework.common.objects.AttributeInfo
import org.identityconnectors.framework.common.objects.ObjectClass
import org.identityconnectors.framework.common.objects.OperationOptionInfoBuilder
import org.identityconnectors.framework.spi.operations.SearchOp

def operation = operation as OperationType
def configuration = configuration as ScriptedConfiguration
def log = log as Log

return builder.schema {
    objectClass {
        type "__ACCOUNT__"
        attributes {
"#;

const SCHEMA_OPERATION_OPTIONS: &str = r#"
    // Operation options
    defineOperationOption OperationOptionInfoBuilder.buildPagedResultsCookie(), SearchOp
    defineOperationOption OperationOptionInfoBuilder.buildPagedResultsOffset(), SearchOp
    defineOperationOption OperationOptionInfoBuilder.buildPageSize(), SearchOp
    defineOperationOption OperationOptionInfoBuilder.buildSortKeys(), SearchOp
    defineOperationOption OperationOptionInfoBuilder.buildRunWithUser()
    defineOperationOption OperationOptionInfoBuilder.buildRunWithPassword()
}
"#;

pub fn schema_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}_schema.groovy"))
}

/// Renders the schema script: one `__ACCOUNT__` object class covering every
/// header (permission columns flagged multivalued) plus one auxiliary object
/// class per permission column.
pub fn render_schema(headers: &[String], permission_columns: &[String]) -> String {
    let mut script = String::from(SCHEMA_PRELUDE);
    for header in headers {
        let _ = write!(script, "            \"{header}\" String.class");
        if permission_columns.contains(header) {
            script.push_str(", MULTIVALUED");
        }
        script.push('\n');
    }
    script.push_str("        }\n    }\n");

    for column in permission_columns {
        let object_class = column.to_uppercase();
        let _ = write!(
            script,
            "\n    objectClass {{\n        type \"{object_class}\"\n        attributes {{\n            \"{column}_id\" String.class, REQUIRED\n            \"{column}\" String.class, REQUIRED\n        }}\n    }}\n"
        );
    }

    script.push_str(SCHEMA_OPERATION_OPTIONS);
    script
}

pub fn write_schema(headers: &[String], permission_columns: &[String], prefix: &str) -> Result<()> {
    let path = schema_path(prefix);
    let script = render_schema(headers, permission_columns);
    fs::write(&path, script).with_context(|| format!("Writing schema script to {path:?}"))?;
    info!(
        "Wrote connector schema for {} attribute(s) to {:?}",
        headers.len(),
        path
    );
    Ok(())
}
