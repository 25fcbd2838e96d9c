//! Documentation attached to delegate methods and to well-known arguments.

use super::naming::{capitalize, model_args_name, uncapitalize};
use crate::dmmf::{DmmfHelper, FieldKind, ModelAction};
use crate::ts::DocComment;

const UNDEFINED_NOTE: &str = "Note, that providing `undefined` is treated as the value not being there.
Read more here: https://pris.ly/d/null-undefined";

const CURSOR_DOCS: &str = "{@link https://www.prisma.io/docs/concepts/components/prisma-client/pagination#cursor-based-pagination Cursor Docs}";
const PAGINATION_DOCS: &str = "{@link https://www.prisma.io/docs/concepts/components/prisma-client/pagination Pagination Docs}";
const AGGREGATION_DOCS: &str = "{@link https://www.prisma.io/docs/concepts/components/prisma-client/aggregations Aggregation Docs}";
const DISTINCT_DOCS: &str = "{@link https://www.prisma.io/docs/concepts/components/prisma-client/distinct Distinct Docs}";
const SORTING_DOCS: &str = "{@link https://www.prisma.io/docs/concepts/components/prisma-client/sorting Sorting Docs}";

fn with_link(link: &str, text: String) -> String {
    format!("{}\n\n{}", link, text)
}

/// Names a model is referred to by in documentation.
#[derive(Debug, Clone)]
pub struct DocNames {
    /// `User`
    pub singular: String,
    /// `Users`
    pub plural: String,
    /// `users`, the mapping's plural as written
    pub plural_var: String,
    /// `user`
    pub var: String,
    pub first_scalar: Option<String>,
}

impl DocNames {
    pub fn new(dmmf: &DmmfHelper, model: &str) -> Self {
        let plural_var = dmmf
            .mapping(model)
            .map(|m| m.plural.clone())
            .unwrap_or_else(|| format!("{}s", uncapitalize(model)));
        let first_scalar = dmmf.model(model).and_then(|m| {
            m.fields
                .iter()
                .find(|f| f.kind == FieldKind::Scalar)
                .map(|f| f.name.clone())
        });
        Self {
            singular: capitalize(model),
            plural: capitalize(&plural_var),
            plural_var,
            var: uncapitalize(model),
            first_scalar,
        }
    }

    fn method(&self, action: ModelAction) -> String {
        format!("prisma.{}.{}", self.var, action.as_str())
    }
}

/// Documentation of a delegate method.
pub fn action_doc(names: &DocNames, model: &str, action: ModelAction) -> DocComment {
    let args = model_args_name(model, Some(action));
    let method = names.method(action);
    let DocNames { singular: s, plural: p, var, .. } = names;

    let text = match action {
        ModelAction::FindUnique => format!(
            "Find zero or one {s} that matches the filter.
@param {{{args}}} args - Arguments to find a {s}
@example
// Get one {s}
const {var} = await {method}({{
  where: {{
    // ... provide filter here
  }}
}})"
        ),
        ModelAction::FindUniqueOrThrow => format!(
            "Find one {s} that matches the filter or throw an error with `error.code='P2025'`
if no matches were found.
@param {{{args}}} args - Arguments to find a {s}
@example
// Get one {s}
const {var} = await {method}({{
  where: {{
    // ... provide filter here
  }}
}})"
        ),
        ModelAction::FindFirst => format!(
            "Find the first {s} that matches the filter.
{UNDEFINED_NOTE}
@param {{{args}}} args - Arguments to find a {s}
@example
// Get one {s}
const {var} = await {method}({{
  where: {{
    // ... provide filter here
  }}
}})"
        ),
        ModelAction::FindFirstOrThrow => format!(
            "Find the first {s} that matches the filter or
throw `PrismaKnownClientError` with `P2025` code if no matches were found.
{UNDEFINED_NOTE}
@param {{{args}}} args - Arguments to find a {s}
@example
// Get one {s}
const {var} = await {method}({{
  where: {{
    // ... provide filter here
  }}
}})"
        ),
        ModelAction::FindMany => {
            let plural_var = &names.plural_var;
            let only_select = names
                .first_scalar
                .as_ref()
                .map(|field| {
                    format!(
                        "\n// Only select the `{field}`\nconst {var}With{}Only = await {method}({{ select: {{ {field}: true }} }})",
                        capitalize(field)
                    )
                })
                .unwrap_or_default();
            format!(
                "Find zero or more {p} that matches the filter.
{UNDEFINED_NOTE}
@param {{{args}}} args - Arguments to filter and select certain fields only.
@example
// Get all {p}
const {plural_var} = await {method}()

// Get first 10 {p}
const {plural_var} = await {method}({{ take: 10 }})
{only_select}"
            )
        }
        ModelAction::Create => format!(
            "Create a {s}.
@param {{{args}}} args - Arguments to create a {s}.
@example
// Create one {s}
const {s} = await {method}({{
  data: {{
    // ... data to create a {s}
  }}
}})"
        ),
        ModelAction::CreateMany => format!(
            "Create many {p}.
@param {{{args}}} args - Arguments to create many {p}.
@example
// Create many {p}
const {var} = await {method}({{
  data: [
    // ... provide data here
  ]
}})"
        ),
        ModelAction::CreateManyAndReturn => format!(
            "Create many {p} and returns the data saved in the database.
@param {{{args}}} args - Arguments to create many {p}.
@example
// Create many {p}
const {var} = await {method}({{
  data: [
    // ... provide data here
  ]
}})

// Create many {p} and only return the `id`
const {var}WithIdOnly = await {method}({{
  select: {{ id: true }},
  data: [
    // ... provide data here
  ]
}})
{UNDEFINED_NOTE}"
        ),
        ModelAction::Delete => format!(
            "Delete a {s}.
@param {{{args}}} args - Arguments to delete one {s}.
@example
// Delete one {s}
const {s} = await {method}({{
  where: {{
    // ... filter to delete one {s}
  }}
}})"
        ),
        ModelAction::Update => format!(
            "Update one {s}.
@param {{{args}}} args - Arguments to update one {s}.
@example
// Update one {s}
const {var} = await {method}({{
  where: {{
    // ... provide filter here
  }},
  data: {{
    // ... provide data here
  }}
}})"
        ),
        ModelAction::DeleteMany => format!(
            "Delete zero or more {p}.
@param {{{args}}} args - Arguments to filter {p} to delete.
@example
// Delete a few {p}
const {{ count }} = await {method}({{
  where: {{
    // ... provide filter here
  }}
}})"
        ),
        ModelAction::UpdateMany => format!(
            "Update zero or more {p}.
{UNDEFINED_NOTE}
@param {{{args}}} args - Arguments to update one or more rows.
@example
// Update many {p}
const {var} = await {method}({{
  where: {{
    // ... provide filter here
  }},
  data: {{
    // ... provide data here
  }}
}})"
        ),
        ModelAction::UpdateManyAndReturn => format!(
            "Update zero or more {p} and returns the data updated in the database.
@param {{{args}}} args - Arguments to update many {p}.
@example
// Update many {p}
const {var} = await {method}({{
  where: {{
    // ... provide filter here
  }},
  data: [
    // ... provide data here
  ]
}})

// Update zero or more {p} and only return the `id`
const {var}WithIdOnly = await {method}({{
  select: {{ id: true }},
  where: {{
    // ... provide filter here
  }},
  data: [
    // ... provide data here
  ]
}})
{UNDEFINED_NOTE}"
        ),
        ModelAction::Upsert => format!(
            "Create or update one {s}.
@param {{{args}}} args - Arguments to update or create a {s}.
@example
// Update or create a {s}
const {var} = await {method}({{
  create: {{
    // ... data to create a {s}
  }},
  update: {{
    // ... in case it already exists, update
  }},
  where: {{
    // ... the filter for the {s} we want to update
  }}
}})"
        ),
        ModelAction::Count => format!(
            "Count the number of {p}.
{UNDEFINED_NOTE}
@param {{{args}}} args - Arguments to filter {p} to count.
@example
// Count the number of {p}
const count = await {method}({{
  where: {{
    // ... the filter for the {p} we want to count
  }}
}})"
        ),
        ModelAction::Aggregate => format!(
            "Allows you to perform aggregations operations on a {s}.
{UNDEFINED_NOTE}
@param {{{args}}} args - Select which aggregations you would like to apply and on what fields.
@example
// Ordered by age ascending
// Where email contains prisma.io
// Limited to the 10 users
const aggregations = await prisma.user.aggregate({{
  _avg: {{
    age: true,
  }},
  where: {{
    email: {{
      contains: \"prisma.io\",
    }},
  }},
  orderBy: {{
    age: \"asc\",
  }},
  take: 10,
}})"
        ),
        ModelAction::GroupBy => format!(
            "Group by {s}.
{UNDEFINED_NOTE}
@param {{{args}}} args - Group by arguments.
@example
// Group by city, order by createdAt, get count
const result = await prisma.user.groupBy({{
  by: ['city', 'createdAt'],
  orderBy: {{
    createdAt: true
  }},
  _count: {{
    _all: true
  }},
}})
"
        ),
        ModelAction::FindRaw => format!(
            "Find zero or more {p} that matches the filter.
@param {{{args}}} args - Select which filters you would like to apply.
@example
const {var} = await {method}({{
  filter: {{ age: {{ $gt: 25 }} }}
}})"
        ),
        ModelAction::AggregateRaw => format!(
            "Perform aggregation operations on a {s}.
@param {{{args}}} args - Select which aggregations you would like to apply.
@example
const {var} = await {method}({{
  pipeline: [
    {{ $match: {{ status: \"registered\" }} }},
    {{ $group: {{ _id: \"$country\", total: {{ $sum: 1 }} }} }}
  ]
}})"
        ),
    };
    DocComment::new(&text)
}

/// Documentation for a well-known argument of `action`; `None` leaves the
/// schema comment in place.
pub fn arg_field_doc(names: &DocNames, action: Option<ModelAction>, arg: &str) -> Option<String> {
    use ModelAction::*;
    let (s, p) = (&names.singular, &names.plural);
    let action = action?;

    let take = || with_link(PAGINATION_DOCS, format!("Take `±n` {p} from the position of the cursor."));
    let skip = || with_link(PAGINATION_DOCS, format!("Skip the first `n` {p}."));
    let order_by = || with_link(SORTING_DOCS, format!("Determine the order of {p} to fetch."));
    let distinct = || with_link(DISTINCT_DOCS, format!("Filter by unique combinations of {p}."));

    let doc = match (action, arg) {
        (FindUnique | FindUniqueOrThrow | FindFirst | FindFirstOrThrow, "where") => {
            format!("Filter, which {s} to fetch.")
        }
        (FindMany, "where") => format!("Filter, which {p} to fetch."),
        (FindFirst | FindFirstOrThrow, "cursor") => {
            with_link(CURSOR_DOCS, format!("Sets the position for searching for {p}."))
        }
        (FindMany, "cursor") => with_link(CURSOR_DOCS, format!("Sets the position for listing {p}.")),
        (FindFirst | FindFirstOrThrow | FindMany | Aggregate, "orderBy") => order_by(),
        (FindFirst | FindFirstOrThrow | FindMany | Aggregate, "take") => take(),
        (FindFirst | FindFirstOrThrow | FindMany | Aggregate, "skip") => skip(),
        (FindFirst | FindFirstOrThrow | FindMany, "distinct") => distinct(),
        (Create, "data") => format!("The data needed to create a {s}."),
        (CreateMany | CreateManyAndReturn, "data") => format!("The data used to create many {p}."),
        (Update, "data") => format!("The data needed to update a {s}."),
        (Update, "where") => format!("Choose, which {s} to update."),
        (UpdateMany | UpdateManyAndReturn, "data") => format!("The data used to update {p}."),
        (UpdateMany | UpdateManyAndReturn, "where") => format!("Filter which {p} to update"),
        (UpdateMany | UpdateManyAndReturn, "limit") => format!("Limit how many {p} to update."),
        (Upsert, "where") => format!("The filter to search for the {s} to update in case it exists."),
        (Upsert, "create") => format!(
            "In case the {s} found by the `where` argument doesn't exist, create a new {s} with this data."
        ),
        (Upsert, "update") => {
            format!("In case the {s} was found with the provided `where` argument, update it with this data.")
        }
        (Delete, "where") => format!("Filter which {s} to delete."),
        (DeleteMany, "where") => format!("Filter which {p} to delete"),
        (DeleteMany, "limit") => format!("Limit how many {p} to delete."),
        (Aggregate, "where") => format!("Filter which {s} to aggregate."),
        (Aggregate, "cursor") => with_link(CURSOR_DOCS, "Sets the start position".to_string()),
        (Aggregate, "_count") => with_link(AGGREGATION_DOCS, format!("Count returned {p}")),
        (Aggregate, "_avg") => with_link(AGGREGATION_DOCS, "Select which fields to average".to_string()),
        (Aggregate, "_sum") => with_link(AGGREGATION_DOCS, "Select which fields to sum".to_string()),
        (Aggregate, "_min") => {
            with_link(AGGREGATION_DOCS, "Select which fields to find the minimum value".to_string())
        }
        (Aggregate, "_max") => {
            with_link(AGGREGATION_DOCS, "Select which fields to find the maximum value".to_string())
        }
        _ => return None,
    };
    Some(doc)
}
