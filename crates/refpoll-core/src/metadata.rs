//! Commit metadata rendering for operation responses.

use refpoll_config::MetadataField;
use refpoll_git::Commit;

/// The fixed calendar format for the `Date` field, RFC 822 style.
const DATE_FORMAT: &str = "%d %b %y %H:%M %Z";

/// Renders the ordered metadata pairs for a commit: `Commit`, `Message`,
/// `Date`, `Author`, and `Tag` when the commit was reached through one.
#[must_use]
pub fn describe(commit: &Commit) -> Vec<MetadataField> {
    let mut fields = vec![
        MetadataField::new("Commit", &commit.id),
        MetadataField::new("Message", commit.message.trim()),
        MetadataField::new("Date", commit.author.when.format(DATE_FORMAT).to_string()),
        MetadataField::new(
            "Author",
            format!("{} <{}>", commit.author.name, commit.author.email),
        ),
    ];
    if let Some(tag) = &commit.tag {
        fields.push(MetadataField::new("Tag", tag));
    }
    fields
}
