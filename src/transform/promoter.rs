//! Promote mapped query parameters into request headers.

use crate::event::CfRequest;
use crate::mapping::MappingTable;
use crate::transform::query::QueryParams;

/// What the promoter did to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    /// Query string empty, absent, or with nothing decodable. Request untouched.
    Skipped,
    /// Query string re-encoded; `promoted` headers were written.
    Rewritten { promoted: usize },
}

impl Promotion {
    pub fn promoted(&self) -> usize {
        match self {
            Promotion::Skipped => 0,
            Promotion::Rewritten { promoted } => *promoted,
        }
    }
}

/// Rewrite `request` in place.
///
/// For each mapping entry, in table order, whose source key appears in the
/// query string, the header is set to a single record carrying the first value
/// of that parameter and the parameter is consumed. The query string is then
/// replaced with the re-encoded remaining parameters. Any existing header with
/// the same lower-cased name is overwritten.
pub fn promote_query_params(mapping: &MappingTable, request: &mut CfRequest) -> Promotion {
    let mut params = match request.querystring.as_deref() {
        Some(raw) if !raw.is_empty() => QueryParams::parse(raw),
        _ => return Promotion::Skipped,
    };
    if params.is_empty() {
        return Promotion::Skipped;
    }

    let mut promoted = 0;
    for entry in mapping {
        if let Some(value) = params.remove(entry.source_key()) {
            tracing::trace!(
                source_key = entry.source_key(),
                header = entry.header_name(),
                "Promoting query parameter"
            );
            request.set_header(entry.header_name(), value);
            promoted += 1;
        }
    }

    request.querystring = Some(params.encode());
    Promotion::Rewritten { promoted }
}
