//! Price trend chart
//!
//! Builds a serialisable line chart in the shape chart.js expects, plotting a
//! product's prices against the date they were observed.

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::observations::PriceObservation;

pub mod locale;

pub use locale::{DateFormat, DateLocale, UnknownLocale};

/// Line colour.
pub const BORDER_COLOR: &str = "rgb(60, 162, 162)";

/// Point fill colour.
pub const BACKGROUND_COLOR: &str = "rgba(60, 162, 162, 0.5)";

/// Line curve tension.
pub const TENSION: f64 = 0.1;

/// Rotation applied to x-axis ticks, in degrees.
pub const TICK_ROTATION: u16 = 90;

/// A single-series line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChart {
    /// Always `"line"`.
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// Labels and the plotted series.
    pub data: ChartData,

    /// Display options.
    pub options: ChartOptions,

    /// Two-line tick text for each label, day above month.
    pub tick_labels: Vec<String>,
}

/// Chart labels and datasets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// One date label per point.
    pub labels: Vec<String>,

    /// The plotted series.
    pub datasets: Vec<Dataset>,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Legend text.
    pub label: String,

    /// Price values.
    pub data: Vec<f64>,

    /// Whether the area under the line is filled.
    pub fill: bool,

    /// Line colour.
    pub border_color: &'static str,

    /// Point colour.
    pub background_color: &'static str,

    /// Curve tension.
    pub tension: f64,
}

/// Display options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    /// Resize with the container.
    pub responsive: bool,

    /// Legend and title.
    pub plugins: Plugins,

    /// Axis options.
    pub scales: Scales,
}

/// Legend and title options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    /// Legend placement.
    pub legend: Legend,

    /// Chart title.
    pub title: Title,
}

/// Legend placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    /// Where the legend is drawn.
    pub position: &'static str,
}

/// Chart title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    /// Whether the title is shown.
    pub display: bool,

    /// Title text.
    pub text: String,
}

/// Axis options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scales {
    /// The date axis.
    pub x: Axis,
}

/// Options for one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    /// Tick options.
    pub ticks: Ticks,
}

/// Tick rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    /// Maximum rotation in degrees.
    pub max_rotation: u16,

    /// Minimum rotation in degrees.
    pub min_rotation: u16,
}

impl LineChart {
    /// Plots a product's prices in chronological order.
    ///
    /// Input order does not matter; observations are sorted oldest first, keeping
    /// the input order for equal timestamps. Returns `None` when there is nothing
    /// to plot.
    pub fn price_trend(
        product_name: &str,
        observations: &[PriceObservation],
        format: &DateFormat,
    ) -> Option<Self> {
        if observations.is_empty() {
            return None;
        }

        let mut chronological: Vec<&PriceObservation> = observations.iter().collect();
        chronological.sort_by_key(|observation| observation.created_at);

        let labels: Vec<String> = chronological
            .iter()
            .map(|observation| format.label(observation.created_at))
            .collect();

        let tick_labels = labels
            .iter()
            .map(|label| format.locale.tick_label(label))
            .collect();

        let series = chronological
            .iter()
            .map(|observation| observation.price.value().to_f64().unwrap_or_default())
            .collect();

        Some(Self {
            kind: "line",
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    label: format!("Precio de {product_name}"),
                    data: series,
                    fill: false,
                    border_color: BORDER_COLOR,
                    background_color: BACKGROUND_COLOR,
                    tension: TENSION,
                }],
            },
            options: ChartOptions {
                responsive: true,
                plugins: Plugins {
                    legend: Legend { position: "top" },
                    title: Title {
                        display: true,
                        text: format!("Evolución del precio de {product_name}"),
                    },
                },
                scales: Scales {
                    x: Axis {
                        ticks: Ticks {
                            max_rotation: TICK_ROTATION,
                            min_rotation: TICK_ROTATION,
                        },
                    },
                },
            },
            tick_labels,
        })
    }

    /// Date labels, oldest first.
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// Plotted prices, oldest first.
    pub fn series(&self) -> &[f64] {
        self.data
            .datasets
            .first()
            .map_or(&[][..], |dataset| dataset.data.as_slice())
    }
}
