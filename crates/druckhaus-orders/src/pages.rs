// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-range evaluation — turns a customer's page selection into the
// number of pages to bill and print.

use druckhaus_core::PageSelection;

/// Evaluate `selection` against a document with `total_pages` pages.
///
/// `All` passes the total through unchanged. A custom expression is a
/// comma-separated list of single page numbers ("5") and hyphenated
/// ranges ("1-3"); each token contributes its page count and the sum is
/// clamped to `[0, total_pages]` so a selection can never exceed the
/// document's real extent.
///
/// This function never fails: malformed tokens contribute 0 pages instead
/// of rejecting the whole expression, so a customer's half-typed input
/// still produces a usable quote.
pub fn billable_pages(selection: &PageSelection, total_pages: u32) -> u32 {
    match selection {
        PageSelection::All => total_pages,
        PageSelection::Custom { ranges } => {
            let mut pages: u32 = 0;
            for token in ranges.split(',') {
                pages = pages.saturating_add(token_pages(token.trim()));
            }
            pages.min(total_pages)
        }
    }
}

/// Page count contributed by a single token.
fn token_pages(token: &str) -> u32 {
    match token.split_once('-') {
        Some((start, end)) => {
            match (start.trim().parse::<u32>(), end.trim().parse::<u32>()) {
                // A reversed range contributes 0 pages, not a negative count.
                (Ok(start), Ok(end)) if end >= start => end - start + 1,
                _ => 0,
            }
        }
        None => u32::from(token.parse::<u32>().is_ok()),
    }
}
