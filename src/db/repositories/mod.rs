use anyhow::Result;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};

pub mod arc;
pub mod catalog;
pub mod character;
pub mod crew;
pub mod devil_fruit;
pub mod episode;
pub mod fruit_holder;
pub mod user;

/// Filtering, ordering and paging parameters of a collection request.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub search: Option<String>,
    pub ordering: Option<String>,
    /// 1-based
    pub page: u64,
    pub page_size: u64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            search: None,
            ordering: None,
            page: 1,
            page_size: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    pub field: String,
    pub descending: bool,
}

/// Parses a comma separated `ordering` value (`-field` sorts descending).
/// Fields outside `allowed` are dropped.
#[must_use]
pub fn parse_ordering(raw: Option<&str>, allowed: &[&str]) -> Vec<OrderTerm> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .filter_map(|term| {
            let (field, descending) = term
                .strip_prefix('-')
                .map_or((term, false), |field| (field, true));
            allowed.contains(&field).then(|| OrderTerm {
                field: field.to_string(),
                descending,
            })
        })
        .collect()
}

/// Escapes `LIKE` metacharacters so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Search and ordering rules of one collection.
pub(crate) struct ListSpec<'a, E: EntityTrait> {
    pub search: &'a [E::Column],
    pub ordering: &'a [(&'a str, E::Column)],
    pub default_ordering: Vec<(E::Column, Order)>,
    pub tie_breaker: E::Column,
}

impl<E: EntityTrait> ListSpec<'_, E> {
    pub(crate) fn apply(&self, select: Select<E>, params: &ListParams) -> Select<E> {
        let mut select = select;

        if let Some(term) = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            let pattern = format!("%{}%", escape_like(term));
            let condition = self.search.iter().fold(Condition::any(), |cond, col| {
                cond.add(col.like(LikeExpr::new(pattern.as_str()).escape('\\')))
            });
            select = select.filter(condition);
        }

        let allowed: Vec<&str> = self.ordering.iter().map(|(name, _)| *name).collect();
        let terms = parse_ordering(params.ordering.as_deref(), &allowed);

        if terms.is_empty() {
            for (col, order) in &self.default_ordering {
                select = select.order_by(*col, order.clone());
            }
        } else {
            for term in terms {
                if let Some((_, col)) = self.ordering.iter().find(|(name, _)| *name == term.field) {
                    let order = if term.descending {
                        Order::Desc
                    } else {
                        Order::Asc
                    };
                    select = select.order_by(*col, order);
                }
            }
        }

        select.order_by_asc(self.tie_breaker)
    }
}

pub(crate) async fn fetch_page<E>(
    conn: &DatabaseConnection,
    select: Select<E>,
    params: &ListParams,
) -> Result<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let paginator = select.paginate(conn, params.page_size.max(1));
    let totals = paginator.num_items_and_pages().await?;

    // Past the last page there is nothing to fetch, and the offset may overflow.
    let items = if params.page > 1 && params.page > totals.number_of_pages {
        Vec::new()
    } else {
        paginator.fetch_page(params.page.saturating_sub(1)).await?
    };

    Ok(Page {
        items,
        count: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}
