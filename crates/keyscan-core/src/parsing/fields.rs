use crate::config::FieldLayout;
use crate::model::Field;

/// Split a line on the layout's delimiter and assign the segments, in
/// order, to the layout's field names.
///
/// Segments are positional: an empty segment stays empty rather than
/// shifting later values left. Missing segments yield empty values and
/// extra segments are ignored.
pub fn parse_fixed_fields(line: &str, layout: &FieldLayout) -> Vec<Field> {
    let mut segments = line.trim().split(layout.delimiter.as_str()).map(str::trim);

    layout
        .names
        .iter()
        .map(|name| Field {
            name: name.clone(),
            value: segments.next().unwrap_or_default().to_string(),
        })
        .collect()
}

/// Fields with the layout's names and empty values, for unmatched keywords.
pub fn empty_fields(layout: &FieldLayout) -> Vec<Field> {
    layout
        .names
        .iter()
        .map(|name| Field {
            name: name.clone(),
            value: String::new(),
        })
        .collect()
}
