//! Bipolar derivation of the space axis
//!
//! A [`BipolarPairing`] maps the space labels to pairs of positions; the derived
//! series holds `data[.., .., first, ..] - data[.., .., second, ..]` for every pair.
//! Every input label must take part in at least one pair.

use crate::errors::{Result, TimeSeriesError};
use crate::labels::{render, Label};
use crate::reporter::Reporter;
use crate::series::LabeledArray;
use ndarray::{Axis, Zip};

/// One derived channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BipolarPair {
    pub first: usize,
    pub second: usize,
    pub name: String,
}

/// Convention pairing space labels into derived channels
pub trait BipolarPairing {
    fn pairs(&self, labels: &[Label]) -> Vec<BipolarPair>;
}

/// Pairs adjacent contacts of one electrode: `A1`, `A2` give `A1-A2`
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactPairing;

/// Split `"A12"` into `("A", 12)`; labels without a trailing number give `None`
fn split_contact(label: &str) -> Option<(&str, u64)> {
    let digits = label.len() - label.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || digits == label.len() {
        return None;
    }
    let (electrode, number) = label.split_at(label.len() - digits);
    number.parse().ok().map(|n| (electrode, n))
}

impl BipolarPairing for ContactPairing {
    fn pairs(&self, labels: &[Label]) -> Vec<BipolarPair> {
        let contacts: Vec<Option<(&str, u64)>> = labels
            .iter()
            .map(|l| l.as_str().and_then(split_contact))
            .collect();
        contacts
            .windows(2)
            .enumerate()
            .filter_map(|(i, w)| match (w[0], w[1]) {
                (Some((e0, n0)), Some((e1, n1))) if e0 == e1 && n1 == n0 + 1 => Some(BipolarPair {
                    first: i,
                    second: i + 1,
                    name: format!("{e0}{n0}-{e1}{n1}"),
                }),
                _ => None,
            })
            .collect()
    }
}

impl LabeledArray {
    /// Derive bipolar channels from the space axis
    ///
    /// # Errors
    ///
    /// `MissingLabels` when the space axis has no labels, `Validation` when the
    /// pairing leaves labels uncovered or refers outside the axis.
    pub fn bipolar(&self, pairing: &dyn BipolarPairing, reporter: &dyn Reporter) -> Result<Self> {
        let labels = self.axis_labels(2usize)?;
        let pairs = pairing.pairs(labels);

        let mut covered = vec![false; labels.len()];
        for pair in &pairs {
            if pair.first >= labels.len() || pair.second >= labels.len() {
                return Err(TimeSeriesError::validation(format!(
                    "bipolar pair '{}' refers to positions ({}, {}) outside {} space labels",
                    pair.name,
                    pair.first,
                    pair.second,
                    labels.len()
                )));
            }
            covered[pair.first] = true;
            covered[pair.second] = true;
        }
        let uncovered: Vec<Label> = labels
            .iter()
            .zip(&covered)
            .filter_map(|(l, &c)| (!c).then(|| l.clone()))
            .collect();
        if !uncovered.is_empty() || pairs.is_empty() {
            let message = format!(
                "bipolar pairing does not cover space labels {:?}",
                render(&uncovered)
            );
            reporter.warn(&message);
            return Err(TimeSeriesError::validation(message));
        }

        let firsts: Vec<usize> = pairs.iter().map(|p| p.first).collect();
        let seconds: Vec<usize> = pairs.iter().map(|p| p.second).collect();
        let mut data = self.data().select(Axis(2), &firsts);
        let subtrahend = self.data().select(Axis(2), &seconds);
        Zip::from(&mut data)
            .and(&subtrahend)
            .for_each(|a, &b| *a -= b);

        let names = pairs.into_iter().map(|p| Label::Str(p.name)).collect();
        self.duplicate().data(data).labels(2usize, names).build()
    }
}
