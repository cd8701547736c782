use crate::class::ResourceClass;
use crate::error::LookupError;
use crate::resource::Resource;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt, TryStreamExt};
use rdf_resources_sparql::{bound_iris, SelectQuery};
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

/// A lazy stream of the [Resource]s of a class.
///
/// The endpoint is queried when the stream is first polled. If the class has a page size, the
/// next page is only requested once the current one has been consumed. Paged enumerations are
/// ordered by `?resource` unless the query has its own ordering. The stream ends at the
/// first page that has fewer solutions than requested.
pub struct ResourceStream {
    inner: BoxStream<'static, Result<Resource, LookupError>>,
}

/// The window of the enumeration that is fetched next.
struct Page {
    class: ResourceClass,
    query: SelectQuery,
    offset: usize,
    remaining: Option<usize>,
}

impl ResourceStream {
    pub(crate) fn new(
        class: ResourceClass,
        query: Result<SelectQuery, LookupError>,
        offset: usize,
        limit: Option<usize>,
    ) -> Self {
        let inner: BoxStream<'static, Result<Resource, LookupError>> = match query {
            Ok(query) => {
                // Pages are only disjoint if the solutions have a fixed order
                let query = if class.config().page_size.is_some()
                    && query.order_conditions().is_empty()
                {
                    query.order_by("?resource")
                } else {
                    query
                };
                let page = Page {
                    class,
                    query,
                    offset,
                    remaining: limit,
                };
                stream::try_unfold(Some(page), fetch_page)
                    .map_ok(|resources| stream::iter(resources.into_iter().map(Ok::<_, LookupError>)))
                    .try_flatten()
                    .boxed()
            }
            Err(error) => stream::once(async move { Err(error) }).boxed(),
        };
        Self { inner }
    }

    pub async fn try_collect_to_vec(mut self) -> Result<Vec<Resource>, LookupError> {
        let mut result = Vec::new();
        while let Some(element) = self.next().await {
            result.push(element?);
        }
        Ok(result)
    }
}

impl Stream for ResourceStream {
    type Item = Result<Resource, LookupError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

async fn fetch_page(
    page: Option<Page>,
) -> Result<Option<(Vec<Resource>, Option<Page>)>, LookupError> {
    let Some(page) = page else {
        return Ok(None);
    };
    let page_size = page.class.config().page_size;
    let window = match (page_size, page.remaining) {
        (Some(size), Some(remaining)) => Some(size.min(remaining)),
        (size, remaining) => size.or(remaining),
    };
    if window == Some(0) {
        return Ok(None);
    }

    let query = match window {
        Some(window) => page
            .query
            .clone()
            .slice(page.offset..page.offset.saturating_add(window)),
        None => page.query.clone().slice(page.offset..),
    };
    debug!(class = page.class.name(), offset = page.offset, "Fetching resources");
    let solutions = page.class.endpoint()?.select(&query).await?;
    let resources = bound_iris(&solutions)
        .into_iter()
        .map(|iri| page.class.resource(iri.into_string()))
        .collect::<Vec<_>>();

    let next = match (page_size, window) {
        (Some(_), Some(window)) if solutions.len() == window => Some(Page {
            offset: page.offset.saturating_add(window),
            remaining: page.remaining.map(|remaining| remaining.saturating_sub(window)),
            ..page
        }),
        _ => None,
    };
    Ok(Some((resources, next)))
}
