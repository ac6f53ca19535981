//! OpenAPI document and `/docs` page for the lookup routes.

use std::path::{Path, PathBuf};

use common::{Error, Result};
use serde_json::{json, Map, Value};
use tracing::info;

const API_TITLE: &str = "Weather Atlas";
const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy)]
enum Payload {
    NameList,
    MonthMap,
    Number,
}

struct RouteDoc {
    path: &'static str,
    operation_id: &'static str,
    summary: &'static str,
    params: &'static [&'static str],
    payload: Payload,
    not_found: Option<&'static str>,
}

const ROUTES: &[RouteDoc] = &[
    RouteDoc {
        path: "/countries",
        operation_id: "countries",
        summary: "Returns a list of available countries.",
        params: &[],
        payload: Payload::NameList,
        not_found: None,
    },
    RouteDoc {
        path: "/countries/{country}",
        operation_id: "cities",
        summary: "Returns a list of cities for a given country.",
        params: &["country"],
        payload: Payload::NameList,
        not_found: Some("countries"),
    },
    RouteDoc {
        path: "/countries/{country}/{city}",
        operation_id: "monthly_averages",
        summary: "Returns the monthly averages for a given city in a country.",
        params: &["country", "city"],
        payload: Payload::MonthMap,
        not_found: Some("cities"),
    },
    RouteDoc {
        path: "/countries/{country}/{city}/{month}",
        operation_id: "monthly_average",
        summary: "Returns the average temperature for a given city in a country for a specific month.",
        params: &["country", "city", "month"],
        payload: Payload::Number,
        not_found: Some("months"),
    },
];

fn payload_schema(payload: Payload) -> Value {
    match payload {
        Payload::NameList => json!({"type": "array", "items": {"type": "string"}}),
        Payload::MonthMap => json!({"type": "object", "additionalProperties": {"type": "number"}}),
        Payload::Number => json!({"type": "number"}),
    }
}

/// Schema of the diagnostic body. `deepest` is the innermost level the route
/// can fail at; every outer level can fail too.
fn not_found_schema(deepest: &str) -> Value {
    let levels = ["countries", "cities", "months"];
    let depth = levels.iter().position(|l| *l == deepest).unwrap_or(0);
    let variants: Vec<Value> = levels[..=depth]
        .iter()
        .map(|level| {
            let field = format!("available_{level}");
            let mut properties = Map::new();
            properties.insert("error".into(), json!({"type": "string"}));
            properties.insert(
                field.clone(),
                json!({"type": "array", "items": {"type": "string"}}),
            );
            json!({
                "type": "object",
                "required": ["error", field],
                "properties": properties,
            })
        })
        .collect();
    json!({"oneOf": variants})
}

fn operation(route: &RouteDoc) -> Value {
    let parameters: Vec<Value> = route
        .params
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "in": "path",
                "required": true,
                "schema": {"type": "string"},
            })
        })
        .collect();

    let schema = match route.not_found {
        Some(deepest) => json!({"oneOf": [payload_schema(route.payload), not_found_schema(deepest)]}),
        None => payload_schema(route.payload),
    };

    json!({
        "get": {
            "operationId": route.operation_id,
            "summary": route.summary,
            "parameters": parameters,
            "responses": {
                "200": {
                    "description": "Successful Response",
                    "content": {"application/json": {"schema": schema}},
                },
            },
        },
    })
}

/// OpenAPI 3 description of the lookup routes.
pub fn document() -> Value {
    let mut paths = Map::new();
    for route in ROUTES {
        paths.insert(route.path.to_string(), operation(route));
    }
    json!({
        "openapi": "3.1.0",
        "info": {"title": API_TITLE, "version": API_VERSION},
        "paths": paths,
    })
}

/// Write the OpenAPI document to `<dir>/openapi.json`.
pub fn write_document(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("openapi.json");
    let body = serde_json::to_string_pretty(&document())?;
    std::fs::write(&path, body)
        .map_err(|e| Error::Other(format!("failed to write {}: {}", path.display(), e)))?;
    info!("Wrote OpenAPI document to {}", path.display());
    Ok(path)
}

/// HTML overview served at `/docs`.
pub fn docs_page() -> String {
    let items: String = ROUTES
        .iter()
        .map(|route| {
            format!(
                "<li><code>GET {}</code> &mdash; {}</li>\n",
                route.path, route.summary
            )
        })
        .collect();
    format!(
        "<!doctype html>\n<html>\n<head><title>{API_TITLE}</title></head>\n<body>\n\
         <h1>{API_TITLE} {API_VERSION}</h1>\n<ul>\n{items}</ul>\n\
         <p><a href=\"/openapi.json\">openapi.json</a></p>\n</body>\n</html>\n"
    )
}
