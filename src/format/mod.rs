//! Output formatting for products (table, JSON, markdown, CSV).

use crate::ceneo::models::{Opinion, Product, ProductSummary, Recommendation};
use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::stats::Distribution;
use serde::Serialize;

/// Widest bar drawn in table distribution charts.
const BAR_WIDTH: usize = 30;

/// Formats products for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product; opinions are listed only when asked for.
    pub fn format_product(&self, product: &Product, with_opinions: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json_single(product, with_opinions),
            OutputFormat::Table => Ok(self.table_single(product, with_opinions)),
            OutputFormat::Markdown => Ok(self.markdown_single(product, with_opinions)),
            OutputFormat::Csv => self.csv_summaries(&[product.summary()]),
        }
    }

    /// Formats the stored product list.
    pub fn format_summaries(&self, summaries: &[ProductSummary]) -> Result<String> {
        if summaries.is_empty() {
            return match self.format {
                OutputFormat::Json => Ok("[]".to_string()),
                OutputFormat::Csv => self.csv_summaries(&[]),
                _ => Ok("No products extracted yet.".to_string()),
            };
        }

        match self.format {
            OutputFormat::Json => to_json(summaries),
            OutputFormat::Table => Ok(self.table_summaries(summaries)),
            OutputFormat::Markdown => Ok(self.markdown_summaries(summaries)),
            OutputFormat::Csv => self.csv_summaries(summaries),
        }
    }

    // JSON formatting

    fn json_single(&self, product: &Product, with_opinions: bool) -> Result<String> {
        #[derive(Serialize)]
        struct View<'a> {
            #[serde(flatten)]
            summary: ProductSummary,
            distribution: Distribution,
            #[serde(skip_serializing_if = "Option::is_none")]
            opinions: Option<&'a [Opinion]>,
        }

        to_json(&View {
            summary: product.summary(),
            distribution: Distribution::calculate(&product.opinions),
            opinions: with_opinions.then_some(product.opinions.as_slice()),
        })
    }

    // Table formatting

    fn table_single(&self, product: &Product, with_opinions: bool) -> String {
        let stats = &product.stats;
        let mut lines = Vec::new();

        lines.push(format!("ID:       {}", product.product_id));
        lines.push(format!("Name:     {}", product.product_name));
        lines.push(format!("Opinions: {}", stats.opinions_count));
        lines.push(format!("Pros:     {}", stats.pros_count));
        lines.push(format!("Cons:     {}", stats.cons_count));
        lines.push(format!("Average:  {}", average(stats.average_score)));

        if !product.opinions.is_empty() {
            let distribution = Distribution::calculate(&product.opinions);

            lines.push(String::new());
            lines.push("Recommendations".to_string());
            let max = Recommendation::all()
                .iter()
                .map(|r| distribution.recommendation_count(*r))
                .max()
                .unwrap_or(0);
            for recommendation in Recommendation::all() {
                let count = distribution.recommendation_count(*recommendation);
                lines.push(format!(
                    "  {:<20} {:>4} {:>5.1}%  {}",
                    recommendation.to_string(),
                    count,
                    percent(count, distribution.total()),
                    bar(count, max)
                ));
            }

            lines.push(String::new());
            lines.push("Stars".to_string());
            let max = distribution.stars.iter().copied().max().unwrap_or(0);
            for (stars, count) in distribution.star_buckets() {
                lines.push(format!(
                    "  {:>3.1} {:>4} {:>5.1}%  {}",
                    stars,
                    count,
                    percent(count, distribution.total()),
                    bar(count, max)
                ));
            }
        }

        if with_opinions {
            for opinion in &product.opinions {
                lines.push(String::new());
                lines.push(self.table_opinion(opinion));
            }
        }

        lines.join("\n")
    }

    fn table_opinion(&self, opinion: &Opinion) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "[{}] {} | {} | {}",
            opinion.opinion_id,
            opinion.author.as_deref().unwrap_or("anonymous"),
            opinion.stars.as_deref().unwrap_or("N/A"),
            opinion.recommendation
        ));
        if let Some(content) = &opinion.content {
            lines.push(format!("  {}", content));
        }
        if !opinion.pros.is_empty() {
            lines.push(format!("  + {}", opinion.pros.join(", ")));
        }
        if !opinion.cons.is_empty() {
            lines.push(format!("  - {}", opinion.cons.join(", ")));
        }
        lines.push(format!(
            "  useful: {}  useless: {}  published: {}  purchased: {}",
            opinion.useful.unwrap_or(0),
            opinion.useless.unwrap_or(0),
            opinion.published.as_deref().unwrap_or("N/A"),
            opinion.purchased.as_deref().unwrap_or("N/A")
        ));

        lines.join("\n")
    }

    fn table_summaries(&self, summaries: &[ProductSummary]) -> String {
        // Calculate column widths
        let id_width = summaries.iter().map(|s| s.product_id.len()).max().unwrap_or(0).max(10);
        let count_width = 8;
        let avg_width = 7;
        let name_width = 50;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<id_width$}  {:>count_width$}  {:>count_width$}  {:>count_width$}  {:>avg_width$}  {}",
            "ID", "Opinions", "Pros", "Cons", "Average", "Name"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<count_width$}  {:-<count_width$}  {:-<count_width$}  {:-<avg_width$}  {:-<name_width$}",
            "", "", "", "", "", ""
        ));

        // Rows
        for summary in summaries {
            let stats = &summary.stats;
            lines.push(format!(
                "{:<id_width$}  {:>count_width$}  {:>count_width$}  {:>count_width$}  {:>avg_width$}  {}",
                summary.product_id,
                stats.opinions_count,
                stats.pros_count,
                stats.cons_count,
                average(stats.average_score),
                truncate(&summary.product_name, name_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", summaries.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product, with_opinions: bool) -> String {
        let stats = &product.stats;
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.product_name));
        lines.push(String::new());
        lines.push(format!("- **ID:** {}", product.product_id));
        lines.push(format!("- **Opinions:** {}", stats.opinions_count));
        lines.push(format!("- **With pros:** {}", stats.pros_count));
        lines.push(format!("- **With cons:** {}", stats.cons_count));
        lines.push(format!("- **Average score:** {}", average(stats.average_score)));

        if !product.opinions.is_empty() {
            let distribution = Distribution::calculate(&product.opinions);
            let total = distribution.total();

            lines.push(String::new());
            lines.push("### Recommendations".to_string());
            lines.push(String::new());
            lines.push("| Recommendation | Opinions | Share |".to_string());
            lines.push("|----------------|----------|-------|".to_string());
            for recommendation in Recommendation::all() {
                let count = distribution.recommendation_count(*recommendation);
                lines.push(format!(
                    "| {} | {} | {:.1}% |",
                    recommendation,
                    count,
                    percent(count, total)
                ));
            }

            lines.push(String::new());
            lines.push("### Stars".to_string());
            lines.push(String::new());
            lines.push("| Stars | Opinions | Share |".to_string());
            lines.push("|-------|----------|-------|".to_string());
            for (stars, count) in distribution.star_buckets() {
                lines.push(format!("| {:.1} | {} | {:.1}% |", stars, count, percent(count, total)));
            }
        }

        if with_opinions && !product.opinions.is_empty() {
            lines.push(String::new());
            lines.push("### Opinions".to_string());
            lines.push(String::new());
            lines.push("| ID | Author | Stars | Recommendation | Pros | Cons |".to_string());
            lines.push("|----|--------|-------|----------------|------|------|".to_string());

            for opinion in &product.opinions {
                lines.push(format!(
                    "| {} | {} | {} | {} | {} | {} |",
                    opinion.opinion_id,
                    opinion.author.as_deref().unwrap_or(""),
                    opinion.stars.as_deref().unwrap_or(""),
                    opinion.recommendation,
                    opinion.pros.join(", "),
                    opinion.cons.join(", ")
                ));
            }
        }

        lines.join("\n")
    }

    fn markdown_summaries(&self, summaries: &[ProductSummary]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Name | Opinions | Pros | Cons | Average |".to_string());
        lines.push("|----|------|----------|------|------|---------|".to_string());

        for summary in summaries {
            let stats = &summary.stats;
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                summary.product_id,
                truncate(&summary.product_name, 40),
                stats.opinions_count,
                stats.pros_count,
                stats.cons_count,
                average(stats.average_score)
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products*", summaries.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_summaries(&self, summaries: &[ProductSummary]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record([
            "product_id",
            "product_name",
            "opinions_count",
            "pros_count",
            "cons_count",
            "average_score",
        ])?;
        for summary in summaries {
            let stats = &summary.stats;
            writer.write_record([
                summary.product_id.clone(),
                summary.product_name.clone(),
                stats.opinions_count.to_string(),
                stats.pros_count.to_string(),
                stats.cons_count.to_string(),
                stats.average_score.map(|a| a.to_string()).unwrap_or_default(),
            ])?;
        }

        let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        let text = String::from_utf8(bytes).map_err(|e| Error::ParseFailed {
            what: "CSV output".to_string(),
            reason: e.to_string(),
        })?;

        Ok(text.trim_end().to_string())
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Renders a missing average as "N/A", never as a number.
fn average(score: Option<f64>) -> String {
    score.map(|s| format!("{:.2}", s)).unwrap_or_else(|| "N/A".to_string())
}

/// Share of `total` in percent, 0 when there is nothing to share.
fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat((count * BAR_WIDTH).div_ceil(max))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product() -> Product {
        let mut product = Product::new("91714422", "Xiaomi Robot Vacuum S10");
        product.opinions = vec![
            Opinion {
                author: Some("Ola".to_string()),
                recommendation: Recommendation::Recommends,
                stars: Some("5/5".to_string()),
                content: Some("Sprząta sam".to_string()),
                pros: vec!["mapowanie".to_string()],
                ..Opinion::new("1")
            },
            Opinion {
                recommendation: Recommendation::DoesNotRecommend,
                stars: Some("2/5".to_string()),
                cons: vec!["głośny".to_string()],
                ..Opinion::new("2")
            },
        ];
        product.calculate_stats();
        product
    }

    fn make_empty_product() -> Product {
        let mut product = Product::new("1", "Brak opinii");
        product.calculate_stats();
        product
    }

    // JSON format tests

    #[test]
    fn test_json_single() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_product(&make_product(), false).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["product_id"], "91714422");
        assert_eq!(json["opinions_count"], 2);
        assert_eq!(json["average_score"], 3.5);
        assert_eq!(json["distribution"]["recommends"], 1);
        assert!(json.get("opinions").is_none());
    }

    #[test]
    fn test_json_single_with_opinions() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_product(&make_product(), true).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["opinions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_empty_average_is_null() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_product(&make_empty_product(), false).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(json["average_score"].is_null());
    }

    #[test]
    fn test_json_summaries_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        assert_eq!(formatter.format_summaries(&[]).unwrap(), "[]");
    }

    // Table format tests

    #[test]
    fn test_table_single() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_product(&make_product(), false).unwrap();

        assert!(output.contains("Xiaomi Robot Vacuum S10"));
        assert!(output.contains("Average:  3.50"));
        assert!(output.contains("Recommendations"));
        assert!(output.contains("recommends"));
        assert!(output.contains("Stars"));
        assert!(!output.contains("Sprząta sam"));
    }

    #[test]
    fn test_table_chart_shares() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_product(&make_product(), false).unwrap();

        let recommends = output.lines().find(|l| l.trim_start().starts_with("recommends")).unwrap();
        assert!(recommends.contains("   1  50.0%  #"));
        let unknown = output.lines().find(|l| l.trim_start().starts_with("no opinion")).unwrap();
        assert!(unknown.contains("   0   0.0%"));
        assert!(output.contains("5.0    1  50.0%"));
        assert!(output.contains("2.0    1  50.0%"));
        assert!(output.contains("4.5    0   0.0%"));
    }

    #[test]
    fn test_table_single_with_opinions() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_product(&make_product(), true).unwrap();

        assert!(output.contains("[1] Ola | 5/5 | recommends"));
        assert!(output.contains("[2] anonymous | 2/5 | does not recommend"));
        assert!(output.contains("+ mapowanie"));
        assert!(output.contains("- głośny"));
    }

    #[test]
    fn test_table_empty_product_shows_na() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_product(&make_empty_product(), false).unwrap();

        assert!(output.contains("Opinions: 0"));
        assert!(output.contains("Average:  N/A"));
        assert!(!output.contains("NaN"));
        assert!(!output.contains("Recommendations"));
    }

    #[test]
    fn test_table_summaries() {
        let formatter = Formatter::new(OutputFormat::Table);
        let summaries = vec![make_product().summary(), make_empty_product().summary()];
        let output = formatter.format_summaries(&summaries).unwrap();

        assert!(output.contains("91714422"));
        assert!(output.contains("3.50"));
        assert!(output.contains("N/A"));
        assert!(output.contains("Total: 2 products"));
    }

    #[test]
    fn test_table_summaries_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_summaries(&[]).unwrap(), "No products extracted yet.");
    }

    // Markdown format tests

    #[test]
    fn test_markdown_single() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_product(&make_product(), true).unwrap();

        assert!(output.contains("## Xiaomi Robot Vacuum S10"));
        assert!(output.contains("- **Average score:** 3.50"));
        assert!(output.contains("| 1 | Ola | 5/5 | recommends | mapowanie |  |"));
    }

    #[test]
    fn test_markdown_charts() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_product(&make_product(), false).unwrap();

        assert!(output.contains("### Recommendations"));
        assert!(output.contains("| recommends | 1 | 50.0% |"));
        assert!(output.contains("| does not recommend | 1 | 50.0% |"));
        assert!(output.contains("| no opinion | 0 | 0.0% |"));
        assert!(output.contains("### Stars"));
        assert!(output.contains("| 5.0 | 1 | 50.0% |"));
        assert!(output.contains("| 2.0 | 1 | 50.0% |"));
        assert!(output.contains("| 0.5 | 0 | 0.0% |"));
        assert!(!output.contains("### Opinions"));
    }

    #[test]
    fn test_markdown_empty_product_has_no_charts() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_product(&make_empty_product(), true).unwrap();

        assert!(output.contains("- **Average score:** N/A"));
        assert!(!output.contains("### Stars"));
        assert!(!output.contains("### Opinions"));
    }

    #[test]
    fn test_markdown_summaries() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_summaries(&[make_product().summary()]).unwrap();

        assert!(output.contains("| 91714422 | Xiaomi Robot Vacuum S10 | 2 | 1 | 1 | 3.50 |"));
        assert!(output.contains("*1 products*"));
    }

    // CSV format tests

    #[test]
    fn test_csv_summaries() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter
            .format_summaries(&[make_product().summary(), make_empty_product().summary()])
            .unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(
            lines[0],
            "product_id,product_name,opinions_count,pros_count,cons_count,average_score"
        );
        assert_eq!(lines[1], "91714422,Xiaomi Robot Vacuum S10,2,1,1,3.5");
        assert_eq!(lines[2], "1,Brak opinii,0,0,0,");
    }

    #[test]
    fn test_csv_quotes_names() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let mut product = Product::new("3", "Mikser \"Bosch\", 500W");
        product.calculate_stats();

        let output = formatter.format_product(&product, false).unwrap();
        assert_eq!(output.lines().nth(1), Some("3,\"Mikser \"\"Bosch\"\", 500W\",0,0,0,"));
    }

    #[test]
    fn test_csv_single_is_summary() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_product(&make_product(), true).unwrap();
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_csv_empty_has_header() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert!(formatter.format_summaries(&[]).unwrap().starts_with("product_id,"));
    }

    // Helpers

    #[test]
    fn test_bar() {
        assert_eq!(bar(0, 0), "");
        assert_eq!(bar(10, 10).len(), BAR_WIDTH);
        assert_eq!(bar(1, 10).len(), 3);
        assert_eq!(bar(0, 10), "");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(3, 3), 100.0);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("krótki", 10), "krótki");
        assert_eq!(truncate("bardzo długa nazwa produktu", 10), "bardzo ...");
    }
}
