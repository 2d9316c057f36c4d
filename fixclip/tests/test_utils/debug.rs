use fixclip::path::Path;

/// Helper function to create json string from a path to be used for debugging.
pub fn to_debug_json_str(path: &Path) -> String {
    format!(
        r#"
{{
    "isClosed": {},
    "points": [
        {}
    ]
}}
"#,
        path.is_closed,
        path.iter()
            .map(|p| format!("[{}, {}]", p.x, p.y))
            .collect::<Vec<_>>()
            .join(",\n        ")
    )
}
