//! Confusion matrix heatmap rendered to the terminal

use crate::error::{FraudUtilsError, Result};
use crate::metrics::confusion::normalize_rows;
use std::fmt::Write as _;
use std::str::FromStr;

/// RGB colour
pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];

/// Sequential colour maps, light for low values and dark for high ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    Blues,
    Greens,
    Reds,
    Oranges,
    Purples,
    Greys,
}

impl Colormap {
    fn stops(self) -> [Rgb; 3] {
        match self {
            Colormap::Blues => [[247, 251, 255], [107, 174, 214], [8, 48, 107]],
            Colormap::Greens => [[247, 252, 245], [116, 196, 118], [0, 68, 27]],
            Colormap::Reds => [[255, 245, 240], [251, 106, 74], [103, 0, 13]],
            Colormap::Oranges => [[255, 245, 235], [253, 141, 60], [127, 39, 4]],
            Colormap::Purples => [[252, 251, 253], [158, 154, 200], [63, 0, 125]],
            Colormap::Greys => [[255, 255, 255], [150, 150, 150], [0, 0, 0]],
        }
    }

    /// Colour at position `t` in [0, 1]; out-of-range positions are clamped
    pub fn color_at(self, t: f64) -> Rgb {
        let [low, mid, high] = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t <= 0.5 {
            interpolate(low, mid, t * 2.0)
        } else {
            interpolate(mid, high, (t - 0.5) * 2.0)
        }
    }
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blues" => Ok(Colormap::Blues),
            "greens" => Ok(Colormap::Greens),
            "reds" => Ok(Colormap::Reds),
            "oranges" => Ok(Colormap::Oranges),
            "purples" => Ok(Colormap::Purples),
            "greys" | "grays" => Ok(Colormap::Greys),
            other => Err(format!("unknown colormap '{}'", other)),
        }
    }
}

fn interpolate(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// Annotation colour chosen for contrast with the cell fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    White,
    Black,
}

impl TextColor {
    fn rgb(self) -> Rgb {
        match self {
            TextColor::White => WHITE,
            TextColor::Black => BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub value: f64,
    /// Value rounded to 3 decimals
    pub label: String,
    pub fill: Rgb,
    pub text: TextColor,
}

/// Laid-out heatmap, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub title: String,
    pub class_names: Vec<String>,
    pub cells: Vec<Vec<HeatmapCell>>,
    /// Colour scale lower bound
    pub vmin: f64,
    /// Colour scale upper bound
    pub vmax: f64,
    pub colormap: Colormap,
}

impl Heatmap {
    /// Render as text. With `ansi`, cells get 24-bit background and
    /// foreground colours and the legend shows a colour gradient.
    pub fn render(&self, ansi: bool) -> String {
        let label_width = self
            .class_names
            .iter()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(0)
            .max("True label".len());
        let cell_width = self
            .cells
            .iter()
            .flatten()
            .map(|c| c.label.len())
            .chain(self.class_names.iter().map(|n| n.chars().count()))
            .max()
            .unwrap_or(1)
            + 2;

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(
            out,
            "{:>lw$}   {:^w$}",
            "",
            "Predicted label",
            lw = label_width,
            w = (cell_width + 1) * self.class_names.len()
        );

        let _ = write!(out, "{:>lw$} |", "True label", lw = label_width);
        for name in &self.class_names {
            let _ = write!(out, " {:^w$}", name, w = cell_width);
        }
        out.push('\n');
        let _ = writeln!(
            out,
            "{}-+{}",
            "-".repeat(label_width),
            "-".repeat((cell_width + 1) * self.class_names.len())
        );

        for (name, row) in self.class_names.iter().zip(&self.cells) {
            let _ = write!(out, "{:>lw$} |", name, lw = label_width);
            for cell in row {
                let text = format!("{:^w$}", cell.label, w = cell_width);
                if ansi {
                    let [fr, fg, fb] = cell.fill;
                    let [tr, tg, tb] = cell.text.rgb();
                    let _ = write!(
                        out,
                        " \x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m{}\x1b[0m",
                        fr, fg, fb, tr, tg, tb, text
                    );
                } else {
                    let _ = write!(out, " {}", text);
                }
            }
            out.push('\n');
        }

        let _ = write!(out, "scale [{}, {}]", format_value(self.vmin), format_value(self.vmax));
        if ansi {
            out.push(' ');
            for step in 0..=10 {
                let [r, g, b] = self.colormap.color_at(step as f64 / 10.0);
                let _ = write!(out, "\x1b[48;2;{};{};{}m  \x1b[0m", r, g, b);
            }
        }
        out.push('\n');
        out
    }

    /// Draw the heatmap on stdout
    pub fn show(&self) {
        print!("{}", self.render(true));
    }
}

/// Builder for a confusion matrix heatmap.
///
/// Without normalization the colour scale spans
/// `[min(0, matrix.min()), matrix.max()]`; with it, each row is divided by
/// its sum and the scale spans `[0, 1]`. Annotations are white on cells
/// above half the scale maximum and black elsewhere.
#[derive(Debug, Clone)]
pub struct ConfusionMatrixPlot {
    matrix: Vec<Vec<f64>>,
    class_names: Vec<String>,
    normalize: bool,
    title: String,
    colormap: Colormap,
}

impl ConfusionMatrixPlot {
    pub fn new<S: AsRef<str>>(matrix: &[Vec<f64>], class_names: &[S]) -> Self {
        Self {
            matrix: matrix.to_vec(),
            class_names: class_names.iter().map(|s| s.as_ref().to_string()).collect(),
            normalize: false,
            title: "Confusion matrix".to_string(),
            colormap: Colormap::default(),
        }
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Validate the matrix and lay out every cell
    pub fn build(&self) -> Result<Heatmap> {
        let dim = self.matrix.len();
        if let Some(bad) = self.matrix.iter().find(|row| row.len() != dim) {
            return Err(FraudUtilsError::NonSquareMatrix {
                rows: dim,
                cols: bad.len(),
            });
        }
        if dim == 0 {
            return Err(FraudUtilsError::NonSquareMatrix { rows: 0, cols: 0 });
        }
        if self.class_names.len() != dim {
            return Err(FraudUtilsError::ClassNameMismatch {
                expected: dim,
                actual: self.class_names.len(),
            });
        }

        let (values, vmin, vmax) = if self.normalize {
            (normalize_rows(&self.matrix), 0.0, 1.0)
        } else {
            let flat = self.matrix.iter().flatten().copied();
            let min = flat.clone().fold(f64::INFINITY, f64::min);
            let max = flat.fold(f64::NEG_INFINITY, f64::max);
            (self.matrix.clone(), min.min(0.0), max)
        };

        let thresh = vmax / 2.0;
        let range = vmax - vmin;
        let cells = values
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&value| {
                        let t = if range > 0.0 { (value - vmin) / range } else { 0.0 };
                        HeatmapCell {
                            value,
                            label: format_value(value),
                            fill: self.colormap.color_at(t),
                            text: if value > thresh {
                                TextColor::White
                            } else {
                                TextColor::Black
                            },
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Heatmap {
            title: self.title.clone(),
            class_names: self.class_names.clone(),
            cells,
            vmin,
            vmax,
            colormap: self.colormap,
        })
    }
}

/// Draw a confusion matrix heatmap on stdout.
///
/// `matrix` must be square with one class name per row.
pub fn plot_confusion_matrix<S: AsRef<str>>(
    matrix: &[Vec<f64>],
    class_names: &[S],
    normalize: bool,
    title: &str,
    colormap: Colormap,
) -> Result<()> {
    ConfusionMatrixPlot::new(matrix, class_names)
        .normalize(normalize)
        .title(title)
        .colormap(colormap)
        .build()?
        .show();
    Ok(())
}

/// Round to 3 decimals; integral values print without a fraction
fn format_value(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
