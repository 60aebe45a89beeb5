//! Element id allocation, sequential or swap-aware.

use sha2::{Digest, Sha256};

use super::swap::SwapRequest;

/// Hex characters kept from the digest of a derived id.
const DERIVED_LEN: usize = 16;

/// Hands out DOM ids in construction order.
///
/// Without a swap request ids are `<prefix>-0`, `<prefix>-1`, ... When the
/// frame answers a partial update, the first element takes the target id
/// if the swap replaces the target outright; every other element gets an id
/// derived from the target and its construction index so ids never collide
/// with the page that stays on the client.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    prefix: String,
    count: usize,
    swap: Option<SwapRequest>,
}

impl IdAllocator {
    pub fn new(prefix: impl Into<String>, swap: Option<SwapRequest>) -> Self {
        Self {
            prefix: prefix.into(),
            count: 0,
            swap,
        }
    }

    pub fn allocate(&mut self) -> String {
        let n = self.count;
        self.count += 1;
        match &self.swap {
            None => format!("{}-{n}", self.prefix),
            Some(swap) if n == 0 && swap.strategy.replaces_element() => swap.target.clone(),
            Some(swap) => derive_id(&self.prefix, &swap.target, n),
        }
    }

    /// Number of ids handed out so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn swap(&self) -> Option<&SwapRequest> {
        self.swap.as_ref()
    }
}

/// `<prefix>` followed by the first 16 hex digits of `sha256("<target>:<n>")`.
pub fn derive_id(prefix: &str, target: &str, n: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{target}:{n}").as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("{prefix}{}", &digest[..DERIVED_LEN])
}
