use super::{min_and_max, Error, Progress, Result};
use chrono::prelude::*;
use log::debug;
use plotters::coord::ranged1d::{AsRangedCoord, Ranged};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};

/// matplotlib's first cycle color, #1f77b4
pub const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);

const X_LABELS: usize = 10;
const Y_LABELS: usize = 8;
const TICK_SIZE: f64 = 5.;
const LABEL_GAP: f64 = 8.;
/// average glyph width of the sans-serif face, relative to the font size
const CHAR_WIDTH: f64 = 0.6;
/// extra characters per tick label, glyphs wider than the average
const LABEL_SLACK: usize = 1;

/// Everything that defines how the 1RM chart looks.
/// The default reproduces the 10x6 inches figure at 100 dpi.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub figsize: (f64, f64),
    pub dpi: u32,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// counter-clockwise, in degrees
    pub x_label_rotation: f64,
    pub font_size: f64,
    pub title_font_size: f64,
    pub margin: u32,
    pub marker_size: u32,
    pub line_width: u32,
}

impl Default for ChartSpec {
    fn default() -> Self {
        ChartSpec {
            figsize: (10., 6.),
            dpi: 100,
            title: String::from("1RM Progress over Time"),
            x_desc: String::from("Date"),
            y_desc: String::from("1RM (lbs)"),
            x_label_rotation: 45.,
            font_size: 14.,
            title_font_size: 20.,
            margin: 20,
            marker_size: 4,
            line_width: 2,
        }
    }
}

/// Padded ranges of the two axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRanges {
    pub x: (DateTime<Utc>, DateTime<Utc>),
    pub y: (f64, f64),
}

impl AxisRanges {
    pub fn x_span(&self) -> chrono::Duration {
        self.x.1 - self.x.0
    }
}

/// Pixel sizes of the label areas, so that no tick label or axis description is clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
}

/// A rendered chart, row-major RGB pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ChartSpec {
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = (self.figsize.0 * self.dpi as f64).round() as u32;
        let h = (self.figsize.1 * self.dpi as f64).round() as u32;
        (w, h)
    }

    /// The plotted points, one per row and in file order.
    pub fn series(&self, progress: &Progress) -> Vec<(DateTime<Utc>, f64)> {
        progress
            .points()
            .map(|(d, v)| (Utc.from_utc_datetime(&d), v))
            .collect()
    }

    /// Data ranges padded by 1/20 (x) and 1/10 (y) of their span.
    /// Fail when the padded ranges leave what chrono and f64 can represent.
    pub fn axis_ranges(&self, progress: &Progress) -> Result<AxisRanges> {
        let x = match min_and_max(&progress.date[..]) {
            Some((xmin, xmax)) => {
                let xspan = xmax - xmin;
                let xmargin = if xspan == chrono::Duration::zero() {
                    chrono::Duration::days(1)
                } else {
                    xspan / 20
                };
                let xmin = xmin.checked_sub_signed(xmargin).ok_or_else(|| {
                    Error::Range(format!("no room for the date axis before {}", xmin))
                })?;
                let xmax = xmax.checked_add_signed(xmargin).ok_or_else(|| {
                    Error::Range(format!("no room for the date axis after {}", xmax))
                })?;
                (Utc.from_utc_datetime(&xmin), Utc.from_utc_datetime(&xmax))
            }
            None => {
                let epoch = DateTime::<Utc>::from(std::time::UNIX_EPOCH);
                (epoch, epoch + chrono::Duration::days(1))
            }
        };
        let y = match min_and_max(&progress.one_rep_max[..]) {
            Some((ymin, ymax)) => {
                // scaled before subtracting, the plain span overflows for extreme values
                let ymargin = if ymax == ymin {
                    (ymax.abs() / 10.).max(1.)
                } else {
                    ymax / 10. - ymin / 10.
                };
                let (ylow, yhigh) = (ymin - ymargin, ymax + ymargin);
                if !(yhigh - ylow).is_finite() {
                    return Err(Error::Range(format!(
                        "1RM values from {} to {} are too far apart",
                        ymin, ymax
                    )));
                }
                (ylow, yhigh)
            }
            None => (0., 1.),
        };
        Ok(AxisRanges { x, y })
    }

    /// Tight layout: size the label areas from the tick labels plotters will draw.
    pub fn layout(&self, ranges: &AxisRanges) -> Layout {
        let xfmt = x_label_format(ranges.x_span());
        let x_chars = key_points(ranges.x.0..ranges.x.1, X_LABELS)
            .iter()
            .chain([ranges.x.0, ranges.x.1].iter())
            .map(|x| x.format(xfmt).to_string().chars().count())
            .max()
            .unwrap_or_default();
        let y_chars = key_points(ranges.y.0..ranges.y.1, Y_LABELS)
            .iter()
            .chain([ranges.y.0, ranges.y.1].iter())
            .map(|y| format_y_label(*y).chars().count())
            .max()
            .unwrap_or_default();
        let char_w = self.font_size * CHAR_WIDTH;
        let desc_h = self.font_size + 2.;
        let x_tick_labels = if is_vertical(&tick_label_transform(self.x_label_rotation)) {
            (x_chars + LABEL_SLACK) as f64 * char_w
        } else {
            self.font_size
        };
        let x_label_area = TICK_SIZE + x_tick_labels + LABEL_GAP + desc_h + LABEL_GAP;
        let y_label_area =
            TICK_SIZE + (y_chars + LABEL_SLACK) as f64 * char_w + LABEL_GAP + desc_h + LABEL_GAP;
        Layout {
            margin: self.margin,
            x_label_area: x_label_area.ceil() as u32,
            y_label_area: y_label_area.ceil() as u32,
        }
    }

    fn font(&self, size: f64) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal)
    }

    /// Draw the chart on any plotters drawing area.
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        progress: &Progress,
    ) -> Result<()> {
        let ranges = self.axis_ranges(progress)?;
        let layout = self.layout(&ranges);
        let xfmt = x_label_format(ranges.x_span());
        debug!("axis ranges {:?}, layout {:?}", ranges, layout);

        root.fill(&WHITE).map_err(render_err)?;
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, self.font(self.title_font_size))
            .margin(layout.margin)
            .x_label_area_size(layout.x_label_area)
            .y_label_area_size(layout.y_label_area)
            .build_cartesian_2d(ranges.x.0..ranges.x.1, ranges.y.0..ranges.y.1)
            .map_err(render_err)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(X_LABELS)
            .y_labels(Y_LABELS)
            .x_label_style(
                self.font(self.font_size)
                    .transform(tick_label_transform(self.x_label_rotation)),
            )
            .y_label_style(self.font(self.font_size))
            .x_label_formatter(&|x: &DateTime<Utc>| x.format(xfmt).to_string())
            .y_label_formatter(&|y: &f64| format_y_label(*y))
            .x_desc(&self.x_desc)
            .y_desc(&self.y_desc)
            .axis_desc_style(self.font(self.font_size + 2.))
            .draw()
            .map_err(render_err)?;

        let series = self.series(progress);
        chart
            .draw_series(LineSeries::new(
                series.iter().copied(),
                SERIES_COLOR.stroke_width(self.line_width),
            ))
            .map_err(render_err)?;
        chart
            .draw_series(
                series
                    .iter()
                    .map(|&p| Circle::new(p, self.marker_size, SERIES_COLOR.filled())),
            )
            .map_err(render_err)?;
        Ok(())
    }

    /// Render the chart to an in-memory RGB buffer, nothing is written to disk.
    pub fn render(&self, progress: &Progress) -> Result<RgbImage> {
        let (width, height) = self.pixel_size();
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            self.draw(&root, progress)?;
            root.present().map_err(render_err)?;
        }
        Ok(RgbImage {
            width,
            height,
            pixels,
        })
    }
}

/// The tick values plotters picks for the range, given the wanted number of labels.
fn key_points<R: AsRangedCoord>(range: R, n: usize) -> Vec<R::Value> {
    let coord: R::CoordDescType = range.into();
    coord.key_points(n)
}

fn render_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Render(e.to_string())
}

/// Date label format, based on the span of the x axis.
pub fn x_label_format(d: chrono::Duration) -> &'static str {
    if d > chrono::Duration::weeks(1) {
        "%Y-%m-%d"
    } else if d > chrono::Duration::days(1) {
        "%m-%d %H:%M"
    } else {
        "%H:%M"
    }
}

pub fn format_y_label(y: f64) -> String {
    format!("{:.1}", y)
}

/// plotters draws text only at quarter turns:
/// a counter-clockwise rotation snaps up to the next quarter turn in the same direction.
pub fn tick_label_transform(degrees: f64) -> FontTransform {
    let d = (degrees + 180.).rem_euclid(360.) - 180.;
    if d == 0. {
        FontTransform::None
    } else if d > 0. && d <= 90. {
        FontTransform::Rotate270
    } else if d < 0. && d >= -90. {
        FontTransform::Rotate90
    } else {
        FontTransform::Rotate180
    }
}

fn is_vertical(t: &FontTransform) -> bool {
    matches!(t, FontTransform::Rotate90 | FontTransform::Rotate270)
}
