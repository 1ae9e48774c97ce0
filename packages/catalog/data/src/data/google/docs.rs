pub mod append_text;
pub mod create_document;
pub mod get_document;

use linkflow_types::Value;

pub const DOCS_API_URL: &str = "https://docs.googleapis.com/v1";

/// Concatenates the text runs of a document body in reading order.
pub fn plain_text(document: &Value) -> String {
    let mut text = String::new();
    let Some(content) = document["body"]["content"].as_array() else {
        return text;
    };

    for element in content {
        let Some(elements) = element["paragraph"]["elements"].as_array() else {
            continue;
        };
        for run in elements {
            if let Some(chunk) = run["textRun"]["content"].as_str() {
                text.push_str(chunk);
            }
        }
    }
    text
}
