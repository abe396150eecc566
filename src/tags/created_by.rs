// ABOUTME: Replacement of {created_by:property} tags
// ABOUTME: Reads roles or a named property from the entry creator's directory record

use tracing::debug;

use super::html::esc_html;
use super::patterns::{find_tags, CREATED_BY};
use super::resolver::MergeTagResolver;
use crate::model::{Entry, UserProperty};

impl MergeTagResolver {
    pub fn replace_created_by(&self, text: &str, entry: &Entry) -> String {
        let Some(creator_id) = entry.created_by.filter(|id| *id != 0) else {
            return text.to_string();
        };

        let tags = find_tags(&CREATED_BY, text);
        if tags.is_empty() {
            return text.to_string();
        }

        let creator = self.directory.user(creator_id);
        if creator.is_none() {
            debug!("Entry creator {} not found in directory", creator_id);
        }

        let mut text = text.to_string();
        for tag in tags {
            // A bare {created_by} has nothing to read and stays as written.
            let Some(property) = tag.modifiers.as_deref() else {
                continue;
            };

            let value = match (creator.as_ref(), property.parse::<UserProperty>()) {
                (Some(user), Ok(property)) => user.property(property),
                (_, Err(reason)) => {
                    debug!("{}", reason);
                    String::new()
                }
                (None, Ok(_)) => String::new(),
            };

            text = text.replace(&tag.full_tag, &esc_html(&value));
        }

        text
    }
}
