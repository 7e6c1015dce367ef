// In app/src/report.rs

use analytics::PerformanceSummary;
use std::fmt;
use strategies::MACrossoverSettings;

const RULE: &str = "-----------------------------------";

/// The text report printed by `crossover evaluate`.
pub struct Report<'a> {
    pub settings: &'a MACrossoverSettings,
    pub bars: usize,
    pub summary: &'a PerformanceSummary,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;

        writeln!(f, "\n--- Crossover Performance Report ---")?;
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "Windows:               {} / {}",
            self.settings.short_window, self.settings.long_window
        )?;
        writeln!(f, "Bars Evaluated:        {}", self.bars)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Total Trades:          {}", summary.total_trades)?;
        writeln!(f, "Winning Trades:        {}", summary.winning_trades)?;
        writeln!(f, "Losing Trades:         {}", summary.losing_trades)?;
        writeln!(f, "Win Rate:              {:.2}%", summary.win_rate * 100.0)?;
        writeln!(f, "Total Return:          {:.2}%", summary.total_return * 100.0)?;
        writeln!(f, "{RULE}")?;

        if summary.signals.is_empty() {
            return Ok(());
        }

        writeln!(f, "Recent Signals:")?;
        for detail in &summary.signals {
            writeln!(
                f,
                "  {}  {:<4}  close {:>10.2}  short {:>10.2}  long {:>10.2}  return {:+.4}",
                detail.datetime.format("%Y-%m-%d"),
                detail.signal,
                detail.close_price,
                detail.short_ma,
                detail.long_ma,
                detail.event_return
            )?;
        }
        writeln!(f, "{RULE}")
    }
}
