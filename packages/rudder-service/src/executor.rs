use rudder_domain::{RouteLabel, Selection};

use crate::{Error, Result, RudderService};

/// Raw routing outcome: the answering tool's text plus the selection list as
/// metadata. The typed route is extracted from it afterwards.
#[derive(Debug, Clone)]
pub struct RoutedResponse {
	pub text: String,
	pub selections: Vec<Selection>,
}

impl RudderService {
	/// Full routing cycle for one query: score, select, dispatch to the
	/// chosen tool, and type the route. This is the authoritative place where
	/// raw selector output becomes a `RouteLabel`.
	pub async fn execute(&self, query: &str) -> Result<(String, RouteLabel)> {
		let response = self.route_query(query).await?;
		let route = extract_route(&response.selections);

		Ok((response.text, route))
	}

	async fn route_query(&self, query: &str) -> Result<RoutedResponse> {
		let evidence = self.score(query).await?;
		let selection = self.select(query, &evidence, &self.catalog).await?;
		// The selector guarantees an in-catalog index; anything else still
		// dispatches to search rather than aborting the cycle.
		let route = RouteLabel::from_index(selection.index).unwrap_or(RouteLabel::Search);
		let text = self
			.tools
			.get(route)
			.answer(query)
			.await
			.map_err(|err| Error::Tool { message: err.to_string() })?;

		Ok(RoutedResponse { text, selections: vec![selection] })
	}
}

/// Maps the first selection through the fixed index table; on missing
/// metadata or an index outside the table, logs the error and defaults to
/// search.
pub fn extract_route(selections: &[Selection]) -> RouteLabel {
	let Some(selection) = selections.first() else {
		tracing::error!("Routed response carried no selection metadata; defaulting to search.");

		return RouteLabel::Search;
	};

	match RouteLabel::from_index(selection.index) {
		Some(route) => route,
		None => {
			tracing::error!(
				index = selection.index,
				"Selection index outside the route table; defaulting to search."
			);

			RouteLabel::Search
		},
	}
}
