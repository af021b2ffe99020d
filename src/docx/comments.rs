//! Comments part.

use super::body::BodyReader;
use crate::model::Comment;
use crate::results::ReadResult;
use crate::xml::XmlElement;

/// Read comments from a parsed `w:comments` element.
pub fn read_comments_xml_element(element: &XmlElement, reader: BodyReader<'_>) -> ReadResult<Vec<Comment>> {
    element
        .find_children("w:comment")
        .map(|comment| {
            let Some(comment_id) = comment.attribute("w:id") else {
                return ReadResult::warning("A comment without an ID was ignored");
            };
            reader.read_blocks(comment).map(|body| {
                vec![Comment {
                    comment_id: comment_id.to_string(),
                    body,
                    author_name: optional_attribute(comment, "w:author"),
                    author_initials: optional_attribute(comment, "w:initials"),
                }]
            })
        })
        .collect()
}

fn optional_attribute(element: &XmlElement, name: &str) -> Option<String> {
    element
        .attribute(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
