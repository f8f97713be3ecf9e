// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Pie chart view-model.
//!
//! The view-model is derived, display-only data: option titles paired with
//! their vote counts and one colour per slice. It is rebuilt from the tally
//! whenever counts change, and the serialised form matches the
//! `{ labels, datasets: [{ data, backgroundColor, hoverBackgroundColor }] }`
//! document pie chart renderers consume.

use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt::{self, Display};

use crate::types::VoteTally;

/// Inner cutout of the pie, in percent of the radius.
pub const CUTOUT_PERCENTAGE: u8 = 8;

/// Fixed palette used by [`ColorScheme::Palette`].
const PALETTE: [Rgb; 10] = [
    Rgb::new(54, 162, 235),
    Rgb::new(255, 99, 132),
    Rgb::new(255, 206, 86),
    Rgb::new(75, 192, 192),
    Rgb::new(153, 102, 255),
    Rgb::new(255, 159, 64),
    Rgb::new(201, 203, 207),
    Rgb::new(46, 204, 113),
    Rgb::new(231, 76, 60),
    Rgb::new(52, 73, 94),
];

/// An RGB slice colour, rendered as `rgb(r,g,b)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a colour.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A colour with each channel drawn uniformly from `[0, 255)`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(0..255),
            g: rng.gen_range(0..255),
            b: rng.gen_range(0..255),
        }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How slice colours are assigned on each rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    /// Fresh random colour per option on every rebuild
    #[default]
    Random,
    /// Stable colour keyed by option index
    Palette,
}

impl ColorScheme {
    /// Colours for `count` slices.
    pub fn colors<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<Rgb> {
        match self {
            ColorScheme::Random => (0..count).map(|_| Rgb::random(rng)).collect(),
            ColorScheme::Palette => (0..count).map(|i| PALETTE[i % PALETTE.len()]).collect(),
        }
    }
}

/// Labels, values and colours for the pie chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartViewModel {
    labels: Vec<String>,
    values: Vec<u64>,
    colors: Vec<Rgb>,
}

impl ChartViewModel {
    /// Build the view-model with an explicit random source.
    ///
    /// Values fall back to zero for options the tally does not cover, so the
    /// value list always has one entry per option.
    pub fn build_with<R: Rng>(
        options: &[String],
        tally: Option<&VoteTally>,
        scheme: ColorScheme,
        rng: &mut R,
    ) -> Self {
        let values = (0..options.len())
            .map(|i| tally.and_then(|t| t.get(i)).unwrap_or(0))
            .collect();
        Self {
            labels: options.to_vec(),
            values,
            colors: scheme.colors(options.len(), rng),
        }
    }

    /// Build the view-model using the thread-local random source.
    pub fn build(options: &[String], tally: Option<&VoteTally>, scheme: ColorScheme) -> Self {
        Self::build_with(options, tally, scheme, &mut rand::thread_rng())
    }

    /// Option titles in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Vote counts in option order.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Slice colours in option order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Document handed to the chart renderer.
    pub fn to_chart_data(&self) -> ChartData {
        ChartData {
            labels: self.labels.clone(),
            datasets: vec![Dataset {
                data: self.values.clone(),
                background_color: self.colors.clone(),
                hover_background_color: self.colors.clone(),
            }],
        }
    }
}

/// Serialised chart data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A single pie dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub data: Vec<u64>,
    pub background_color: Vec<Rgb>,
    pub hover_background_color: Vec<Rgb>,
}

/// Legend settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub display: bool,
}

/// Renderer options: no legend and a fixed inner cutout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub cutout_percentage: u8,
    pub legend: Legend,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            cutout_percentage: CUTOUT_PERCENTAGE,
            legend: Legend { display: false },
        }
    }
}
