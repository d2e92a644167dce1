// src/core/binder.rs
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::Markup;
use crate::core::engine::compute;
use crate::core::format::{DEFAULT_UNAVAILABLE, format_results};
use crate::core::markup::Page;
use crate::core::reader::{read_elements, read_form};
use crate::models::{
    CoefficientName, Coefficients, FieldName, FormattedResults, InputName, Inputs, ResultName,
    Results, Scan,
};

/// Why a page could not be bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("no input form carrying `{0}` was found")]
    MissingForm(String),
    #[error("no result elements carrying `{0}` were found")]
    MissingResults(String),
    #[error("no coefficient elements carrying `{0}` were found")]
    MissingCoefficients(String),
}

/// Element handles and constants located once when a page is bound.
#[derive(Debug, Clone)]
pub struct Bound<N> {
    form: N,
    results: Vec<(N, Option<ResultName>)>,
    unknown_results: Vec<String>,
    coefficients: Coefficients,
    coefficient_scan: Scan<CoefficientName>,
    unavailable: String,
}

/// A calculator attached to a page.
///
/// Binding happens once. A page missing the expected markup leaves the
/// binder inert for good; there is no way back from bound either.
#[derive(Debug, Clone)]
pub enum Binder<N> {
    Unbound(BindError),
    Bound(Bound<N>),
}

/// Outcome of one input event.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub inputs: Scan<InputName>,
    pub results: Results,
    pub formatted: FormattedResults,
    /// Result elements whose text was rewritten.
    pub written: usize,
}

impl<N: Copy + Eq + std::fmt::Debug> Binder<N> {
    /// Locates the form, the result elements and the coefficient elements,
    /// and reads the coefficients.
    ///
    /// Must only run once the page markup is present. Missing markup is
    /// logged, not returned: the binder is simply unbound.
    pub fn bind<P>(page: &P, markup: &Markup) -> Self
    where
        P: Page<Node = N>,
    {
        match Self::locate(page, markup) {
            Ok(bound) => Self::Bound(bound),
            Err(err) => {
                error!(%err, "calculator markup not found, leaving page untouched");
                Self::Unbound(err)
            }
        }
    }

    fn locate<P>(page: &P, markup: &Markup) -> Result<Bound<N>, BindError>
    where
        P: Page<Node = N>,
    {
        let form = page
            .query_first(&markup.input_attribute)
            .ok_or_else(|| BindError::MissingForm(markup.input_attribute.clone()))?;

        let result_nodes = page.query_all(&markup.result_attribute);
        if result_nodes.is_empty() {
            return Err(BindError::MissingResults(markup.result_attribute.clone()));
        }

        let coefficient_nodes = page.query_all(&markup.coefficient_attribute);
        if coefficient_nodes.is_empty() {
            return Err(BindError::MissingCoefficients(
                markup.coefficient_attribute.clone(),
            ));
        }

        let coefficient_scan: Scan<CoefficientName> =
            read_elements(page, &coefficient_nodes, &markup.coefficient_attribute);
        for name in &coefficient_scan.unknown {
            warn!(name = %name, "ignoring unknown coefficient");
        }
        for (name, raw) in coefficient_scan.unparsable() {
            debug!(%name, raw, "coefficient is not a number, using 0");
        }

        let mut unknown_results = Vec::new();
        let results = result_nodes
            .into_iter()
            .map(|node| {
                let declared = page.attribute(node, &markup.result_attribute);
                let name = declared.and_then(|declared| match declared.parse::<ResultName>() {
                    Ok(name) => Some(name),
                    Err(err) => {
                        warn!(%err, "result element will not be updated");
                        unknown_results.push(declared);
                        None
                    }
                });
                (node, name)
            })
            .collect();

        debug!(?form, "calculator bound");

        Ok(Bound {
            form,
            results,
            unknown_results,
            coefficients: Coefficients::from_scan(&coefficient_scan),
            coefficient_scan,
            unavailable: String::from(DEFAULT_UNAVAILABLE),
        })
    }

    /// Sets the text shown for values that cannot be displayed.
    #[must_use]
    pub fn with_unavailable(mut self, marker: &str) -> Self {
        if let Self::Bound(bound) = &mut self {
            marker.clone_into(&mut bound.unavailable);
        }
        self
    }

    #[inline]
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }

    #[must_use]
    pub const fn bound(&self) -> Option<&Bound<N>> {
        match self {
            Self::Bound(bound) => Some(bound),
            Self::Unbound(_) => None,
        }
    }

    /// Handles one change to the form: reads the inputs, recomputes every
    /// result and writes the display text into each matching result element.
    ///
    /// Does nothing on an unbound page.
    pub fn on_input<P>(&self, page: &mut P) -> Option<Update>
    where
        P: Page<Node = N>,
    {
        let Self::Bound(bound) = self else {
            return None;
        };

        let inputs: Scan<InputName> = read_form(page, bound.form);
        for name in &inputs.unknown {
            warn!(name = %name, "ignoring unknown form field");
        }
        for (name, raw) in inputs.unparsable() {
            debug!(%name, raw, "input is not a number, using 0");
        }

        let results = compute(&Inputs::from_scan(&inputs), &bound.coefficients);
        let formatted = format_results(&results, &bound.unavailable);

        let mut written = 0_usize;
        for &(node, name) in &bound.results {
            let Some(text) = name.and_then(|name| formatted.get(name)) else {
                continue;
            };
            page.set_text_content(node, text);
            written = written.saturating_add(1);
        }
        debug!(written, "results updated");

        Some(Update {
            inputs,
            results,
            formatted,
            written,
        })
    }
}

impl<N> Bound<N> {
    #[inline]
    #[must_use]
    pub const fn form(&self) -> &N {
        &self.form
    }

    #[inline]
    #[must_use]
    pub const fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Coefficient readings as found on the page, unknown names included.
    #[inline]
    #[must_use]
    pub const fn coefficient_scan(&self) -> &Scan<CoefficientName> {
        &self.coefficient_scan
    }

    #[must_use]
    pub fn result_elements(&self) -> usize {
        self.results.len()
    }

    /// Declared names of result elements that are not known results, in
    /// document order. Those elements are never written.
    #[inline]
    #[must_use]
    pub fn unknown_results(&self) -> &[String] {
        &self.unknown_results
    }

    /// Known results that no element on the page displays.
    #[must_use]
    pub fn undisplayed_results(&self) -> Vec<ResultName> {
        ResultName::ALL
            .iter()
            .copied()
            .filter(|name| !self.results.iter().any(|(_, shown)| *shown == Some(*name)))
            .collect()
    }
}
