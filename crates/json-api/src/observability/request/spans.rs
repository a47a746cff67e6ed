//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = route_template(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Replace contract ids in `path` so every contract shares one route label.
fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{contract}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_ids_are_templated() {
        let names = request_span_name(
            "GET",
            "/contracts/0199ec1e-4f3a-7c2b-9d10-2f6a9b3c4d5e/document",
        );

        assert_eq!(names.otel_path, "/contracts/{contract}/document");
        assert_eq!(names.otel_span_name, "GET /contracts/{contract}/document");
    }

    #[test]
    fn static_routes_are_kept() {
        assert_eq!(route_template("/contract/submit/"), "/contract/submit");
        assert_eq!(route_template("/"), "/");
    }
}
