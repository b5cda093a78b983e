// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Price calculation for print jobs.

use druckhaus_core::{ColorMode, PriceList, PrintOptions, Sides};
use rust_decimal::Decimal;

/// Total to charge for `pages` billable pages under `options`.
///
/// Per-page rate is the colour-mode base plus the double-sided surcharge
/// when applicable; the total is `rate × copies × pages`, rounded to two
/// decimal places for persistence and display. Pure and deterministic —
/// the stored order total is computed exactly once, at creation.
pub fn order_total(prices: &PriceList, options: &PrintOptions, pages: u32) -> Decimal {
    let mut per_page = match options.color {
        ColorMode::Bw => prices.bw_per_page,
        ColorMode::Color => prices.color_per_page,
    };
    if options.sides == Sides::Double {
        per_page += prices.double_sided_surcharge;
    }

    (per_page * Decimal::from(options.copies) * Decimal::from(pages)).round_dp(2)
}
