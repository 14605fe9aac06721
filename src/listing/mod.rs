//! Directory listing parsing.
//!
//! The remote file server publishes an HTML-like index where every file is an
//! anchor (`<a href="a.txt">a.txt</a>`). The document is split on the anchor
//! closing tag; the text after the last `>` of each segment is a file name.
//! The segment following the final closing tag is page furniture and never a
//! file, so it is kept apart as [`Listing::trailing`].

use std::fmt;

use tracing::{debug, instrument};

use crate::remote::{RemoteClient, RemoteError, file_url};

/// Delimiter the listing document is split on.
pub const ANCHOR_CLOSE_TAG: &str = "</a>";

/// A file published by the remote server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteFileReference {
    server_base_url: String,
    file_name: String,
}

impl RemoteFileReference {
    /// Creates a reference to `file_name` under `server_base_url`.
    pub fn new(server_base_url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            server_base_url: server_base_url.into(),
            file_name: file_name.into(),
        }
    }

    /// Base URL of the server publishing the file.
    #[must_use]
    pub fn server_base_url(&self) -> &str {
        &self.server_base_url
    }

    /// File name as it appeared in the listing.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full URL the file is fetched from.
    #[must_use]
    pub fn url(&self) -> String {
        file_url(&self.server_base_url, &self.file_name)
    }
}

impl fmt::Display for RemoteFileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// Parsed directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Candidate files, in document order.
    pub files: Vec<RemoteFileReference>,
    /// Content after the final anchor; never a candidate.
    pub trailing: String,
}

impl Listing {
    /// Number of candidate files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the listing contains no candidate files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Parses a listing document into file references.
///
/// Every split segment but the last yields one reference, in document order.
/// A document without any anchor therefore yields no candidates.
#[must_use]
pub fn parse_listing(body: &str, base_url: &str) -> Listing {
    let mut segments: Vec<&str> = body.split(ANCHOR_CLOSE_TAG).collect();
    // split() always yields at least one segment
    let trailing = segments.pop().unwrap_or_default().to_string();

    let files = segments
        .into_iter()
        .map(|segment| {
            let name = segment
                .rfind('>')
                .map_or(segment, |idx| &segment[idx + 1..]);
            RemoteFileReference::new(base_url, name)
        })
        .collect();

    Listing { files, trailing }
}

/// Fetches and parses the listing published at `base_url`.
///
/// # Errors
///
/// Returns [`RemoteError`] if the listing cannot be fetched or the server
/// answers with a non-success status. No partial listing is returned.
#[instrument(skip(client), fields(base_url = %base_url))]
pub async fn fetch_listing(client: &RemoteClient, base_url: &str) -> Result<Listing, RemoteError> {
    let body = client.fetch_text(base_url).await?;
    let listing = parse_listing(&body, base_url);
    debug!(files = listing.len(), "parsed listing");
    Ok(listing)
}
