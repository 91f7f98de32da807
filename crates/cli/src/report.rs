//! Human-readable output for evaluation results.

use depth_arb_core::MarketOrderBook;
use depth_arb_engine::{
    midpoint_gap, settlement_payoffs, ArbitrageOpportunity, CorrelationType, ProfitPoint,
    ScanSummary,
};

pub fn print_opportunity(opp: &ArbitrageOpportunity) {
    println!("=== Arbitrage Opportunity ===");
    println!(
        "Markets: {} / {} ({})",
        opp.market1.market_id, opp.market2.market_id, opp.correlation
    );
    println!("Strategy: {}", opp.strategy.description);
    println!("Headline edge: ${}", opp.strategy.headline_edge());
    if let Some(gap) = midpoint_gap(opp) {
        println!("Midpoint gap: ${}", gap);
    }

    println!();
    println!("=== Execution ===");
    print_point(&opp.profit_at_small);
    print_point(&opp.profit_at_large);
    println!("Max profitable size: {} shares", opp.max_profitable_shares);
    if let Some(peak) = opp.peak_profit() {
        println!("Peak profit on curve: ${:.2} at {} shares", peak.profit, peak.shares);
    }
    if let Some(roi) = opp.roi_pct() {
        println!("ROI at small size: {:.2}%", roi);
    }

    println!();
    println!("=== Risk ===");
    println!("Slippage risk: {:.2}%", opp.slippage_risk_pct);
    println!("Confidence: {:.0}%", opp.confidence * 100.0);

    let payoffs = settlement_payoffs(&opp.profit_at_small);
    println!(
        "Settlement at {} shares: correlated ${:.2} | bought only ${:.2} | sold only ${:.2}",
        opp.profit_at_small.shares, payoffs.correlated, payoffs.bought_only, payoffs.sold_only
    );

    if !opp.profit_curve.is_empty() {
        println!();
        println!("=== Profit Curve ===");
        for point in &opp.profit_curve {
            println!(
                "  {:>8} shares | cost ${:>12.2} | revenue ${:>12.2} | profit ${:>10.2}",
                point.shares, point.total_cost, point.total_revenue, point.profit
            );
        }
    }
}

fn print_point(point: &ProfitPoint) {
    println!(
        "{} shares: buy @ {:.4}, sell @ {:.4} | cost ${:.2}, revenue ${:.2}, profit ${:.2}",
        point.shares,
        point.buy_price,
        point.sell_price,
        point.total_cost,
        point.total_revenue,
        point.profit
    );
}

pub fn print_no_opportunity(
    market1: &MarketOrderBook,
    market2: &MarketOrderBook,
    correlation: CorrelationType,
) {
    println!(
        "No executable arbitrage between {} and {} ({})",
        market1.id, market2.id, correlation
    );
}

pub fn print_scan_summary(summary: &ScanSummary) {
    println!("=== Scan Summary ===");
    println!("Pairs scanned: {}", summary.pairs_scanned);
    println!(
        "Opportunities: {} ({:.0}% hit rate)",
        summary.opportunities,
        summary.hit_rate() * 100.0
    );
    println!(
        "Total profit at small size: ${:.2}",
        summary.total_profit_at_small
    );

    if let Some(best) = &summary.best_opportunity {
        println!(
            "Best: {}/{} | {} | profit ${:.2} | max {} shares | confidence {:.0}%",
            best.market1_id,
            best.market2_id,
            best.strategy,
            best.profit_at_small,
            best.max_profitable_shares,
            best.confidence * 100.0
        );
    }
}
