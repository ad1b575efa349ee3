//! Line-graph plotting of distributions.
//!
//! Rendering is delegated to a [`Plotter`]. The statistics code only
//! shapes the data into a [`LineGraph`]; [`SvgPlotter`] is the bundled
//! implementation and writes standalone SVG files.

use super::report::{create_parent_dirs, validate_path};
use crate::aggregator::DatabaseStats;
use crate::utils::config::{
    DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_LIMIT, DEFAULT_PLOT_OFFSET, DEFAULT_PLOT_WIDTH,
};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Data and labels for one line graph
#[derive(Debug, Clone, PartialEq)]
pub struct LineGraph {
    /// `(category, value)` points in plotting order
    pub points: Vec<(String, f64)>,
    /// End of the plotted window, as a percentage of the points
    pub limit: usize,
    /// Start of the plotted window, as a percentage of the points
    pub offset: usize,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl LineGraph {
    pub fn new<I, K, V>(points: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: Into<f64>,
    {
        Self {
            points: points
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
            limit: DEFAULT_PLOT_LIMIT,
            offset: DEFAULT_PLOT_OFFSET,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_window(mut self, limit: usize, offset: usize) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    /// The points inside the `offset%..limit%` window
    pub fn visible(&self) -> &[(String, f64)] {
        let len = self.points.len();
        let end = (len * self.limit.min(100)) / 100;
        let start = ((len * self.offset) / 100).min(end);
        &self.points[start..end]
    }
}

/// Renders line graphs
pub trait Plotter {
    fn plot(&mut self, graph: &LineGraph) -> Result<(), OutputError>;
}

/// Hand item frequencies and the length distribution to a plotter
///
/// Two calls, in that order, both over the full window.
pub fn render_distributions<P: Plotter + ?Sized>(
    stats: &DatabaseStats<'_>,
    plotter: &mut P,
) -> Result<(), OutputError> {
    let frequencies = stats
        .item_frequencies()
        .into_iter()
        .map(|(item, count)| (item, count as f64));

    let item_graph = LineGraph::new(frequencies)
        .with_title("Frequency")
        .with_labels("No of items", "frequency");
    plotter.plot(&item_graph)?;

    let lengths = stats
        .length_distribution()
        .into_iter()
        .map(|(length, count)| (length, count as f64));

    let length_graph = LineGraph::new(lengths)
        .with_title("transaction length")
        .with_labels("transaction length", "frequency");
    plotter.plot(&length_graph)?;

    Ok(())
}

/// Writes each graph as `<title>.svg` into a directory
#[derive(Debug, Clone)]
pub struct SvgPlotter {
    output_dir: PathBuf,
    pub width: usize,
    pub height: usize,
    written: Vec<PathBuf>,
}

impl SvgPlotter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            width: DEFAULT_PLOT_WIDTH,
            height: DEFAULT_PLOT_HEIGHT,
            written: Vec::new(),
        }
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn path_for(&self, title: &str) -> PathBuf {
        let mut stem: String = title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        if stem.is_empty() {
            stem.push_str("graph");
        }
        self.output_dir.join(format!("{}.svg", stem))
    }
}

impl Plotter for SvgPlotter {
    fn plot(&mut self, graph: &LineGraph) -> Result<(), OutputError> {
        let svg = render_svg(graph, self.width, self.height);
        let path = self.path_for(&graph.title);
        write_svg(&svg, &path)?;
        self.written.push(path);
        Ok(())
    }
}

/// Render a line graph to an SVG document
pub fn render_svg(graph: &LineGraph, width: usize, height: usize) -> String {
    let points = graph.visible();
    debug!("Rendering '{}' with {} points", graph.title, points.len());

    let margin = 60.0;
    let plot_w = (width as f64 - 2.0 * margin).max(1.0);
    let plot_h = (height as f64 - 2.0 * margin).max(1.0);
    let max_value = points
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let mut svg = String::new();

    // Header
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    ));
    svg.push_str(r#"<style>text { font: 12px sans-serif; }</style>"#);

    // Title and axis labels
    svg.push_str(&format!(
        r#"<text x="{}" y="24" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2,
        escape_xml(&graph.title)
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
        width / 2,
        height as f64 - 15.0,
        escape_xml(&graph.x_label)
    ));
    svg.push_str(&format!(
        r#"<text x="15" y="{y}" text-anchor="middle" transform="rotate(-90 15 {y})">{}</text>"#,
        escape_xml(&graph.y_label),
        y = height / 2
    ));

    // Axes
    svg.push_str(&format!(
        r#"<line x1="{m}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/><line x1="{m}" y1="{m}" x2="{m}" y2="{b}" stroke="black"/>"#,
        m = margin,
        b = margin + plot_h,
        r = margin + plot_w
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="end">{}</text>"#,
        margin - 5.0,
        margin + 4.0,
        max_value
    ));

    if !points.is_empty() {
        let step = if points.len() > 1 {
            plot_w / (points.len() - 1) as f64
        } else {
            0.0
        };

        let coords: Vec<String> = points
            .iter()
            .enumerate()
            .map(|(i, (_, value))| {
                let x = margin + step * i as f64;
                let y = margin + plot_h - (value / max_value) * plot_h;
                format!("{:.2},{:.2}", x, y)
            })
            .collect();

        svg.push_str(&format!(
            r##"<polyline fill="none" stroke="#1f77b4" stroke-width="2" points="{}"/>"##,
            coords.join(" ")
        ));

        // Category ticks, thinned to at most ~20 labels
        let every = (points.len() / 20).max(1);
        for (i, (label, _)) in points.iter().enumerate().step_by(every) {
            svg.push_str(&format!(
                r#"<text x="{:.2}" y="{}" text-anchor="middle">{}</text>"#,
                margin + step * i as f64,
                margin + plot_h + 16.0,
                escape_xml(label)
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Write SVG content to a file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing SVG to: {}", output_path.display());

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(svg_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("SVG written successfully ({} bytes)", svg_content.len());
    Ok(())
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TransactionStore;

    #[derive(Default)]
    struct Recorder {
        graphs: Vec<LineGraph>,
    }

    impl Plotter for Recorder {
        fn plot(&mut self, graph: &LineGraph) -> Result<(), OutputError> {
            self.graphs.push(graph.clone());
            Ok(())
        }
    }

    #[test]
    fn test_render_distributions_two_calls() {
        let store = TransactionStore::from_transactions(vec![vec!["a", "b"], vec!["a"]]);
        let mut recorder = Recorder::default();

        render_distributions(&DatabaseStats::new(&store), &mut recorder).unwrap();

        assert_eq!(recorder.graphs.len(), 2);

        let items = &recorder.graphs[0];
        assert_eq!(items.title, "Frequency");
        assert_eq!(items.x_label, "No of items");
        assert_eq!(items.y_label, "frequency");
        assert_eq!((items.limit, items.offset), (100, 0));
        assert_eq!(
            items.points,
            vec![("a".to_string(), 2.0), ("b".to_string(), 1.0)]
        );

        let lengths = &recorder.graphs[1];
        assert_eq!(lengths.title, "transaction length");
        assert_eq!(
            lengths.points,
            vec![("1".to_string(), 1.0), ("2".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_visible_window() {
        let graph = LineGraph::new((1..=10u32).map(|i| (i, i))).with_window(50, 20);
        let labels: Vec<&str> = graph.visible().iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(labels, vec!["3", "4", "5"]);
    }

    #[test]
    fn test_visible_window_clamps() {
        let graph = LineGraph::new((1..=4u32).map(|i| (i, i))).with_window(200, 90);
        assert_eq!(graph.visible().len(), 1);

        let inverted = LineGraph::new((1..=4u32).map(|i| (i, i))).with_window(25, 75);
        assert!(inverted.visible().is_empty());
    }

    #[test]
    fn test_render_svg_contains_labels() {
        let graph = LineGraph::new(vec![("x<1", 1.0), ("y", 3.0)])
            .with_title("Frequency")
            .with_labels("No of items", "frequency");

        let svg = render_svg(&graph, 400, 300);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Frequency"));
        assert!(svg.contains("x&lt;1"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_svg_plotter_writes_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = TransactionStore::from_transactions(vec![vec!["a"], vec!["a", "b"]]);
        let mut plotter = SvgPlotter::new(temp_dir.path().join("plots"));

        render_distributions(&DatabaseStats::new(&store), &mut plotter).unwrap();

        let written = plotter.written();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("frequency.svg"));
        assert!(written[1].ends_with("transaction_length.svg"));
        assert!(written.iter().all(|p| p.exists()));
    }
}
