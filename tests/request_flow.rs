//! Request flow integration tests
//!
//! Drives a listing request from its query string to the rendered SQL and the
//! header links of the page.

use std::collections::HashMap;

use proptest::prelude::*;
use relsort::prelude::*;
use rstest::{fixture, rstest};

fn build_registry() -> ModelRegistry {
	ModelRegistry::new()
		.with_model(
			ModelMeta::new("Order", "orders")
				.sortable(["number", "total", "placed_at"])
				.relation(RelationDescriptor::belongs_to("customer", "Customer", "customer_id"))
				.default_sort(DefaultSort::new("placed_at").with_direction("desc")),
		)
		.with_model(
			ModelMeta::new("Customer", "customers")
				.sortable(["name"])
				.relation(RelationDescriptor::has_one("address", "Address", "customer_id")),
		)
		.with_model(ModelMeta::new("Address", "addresses").sortable(["city"]))
}

#[fixture]
fn registry() -> ModelRegistry {
	build_registry()
}

fn orders() -> SelectStatement {
	let mut query = Query::select();
	query.from("orders").columns(["id", "number"]);
	query
}

#[rstest]
fn test_query_string_to_sql(registry: ModelRegistry) {
	let filter = OrderingFilter::new(&registry, "Order");
	let mut query = orders();

	let state = filter
		.filter_query_string("?page=2&sort=customer.address.city&direction=DESC", &mut query)
		.unwrap()
		.unwrap();

	let (sql, values) = PostgresQueryBuilder::new().build_select(&query);
	assert_eq!(
		sql,
		r#"SELECT "orders"."id", "orders"."number" FROM "orders" LEFT JOIN "customers" ON "orders"."customer_id" = "customers"."id" LEFT JOIN "addresses" ON "customers"."id" = "addresses"."customer_id" ORDER BY "addresses"."city" DESC"#
	);
	assert!(values.is_empty());
	assert_eq!(state.direction, SortDirection::Desc);
}

#[rstest]
fn test_default_sort_and_links(registry: ModelRegistry) {
	let filter = OrderingFilter::new(&registry, "Order");
	let mut query = orders();
	let mut request = HashMap::from([("status".to_string(), "open".to_string())]);

	let state = filter
		.filter_and_merge(&mut request, &mut query)
		.unwrap()
		.unwrap();

	assert!(state.is_default());
	assert_eq!(request.get("sort").map(String::as_str), Some("placed_at"));
	assert_eq!(
		SqliteQueryBuilder::new().build_select(&query).0,
		r#"SELECT "id", "number" FROM "orders" ORDER BY "orders"."placed_at" DESC"#
	);

	let placed = SortLink::new("placed_at")
		.with_title("Placed")
		.with_base_url("/orders")
		.with_query_param("status", "open")
		.render(Some(&state), filter.settings());
	assert!(placed.active);
	assert_eq!(placed.href, "/orders?status=open&sort=placed_at&direction=asc");
	assert_eq!(placed.label, "Sort ascending");
	assert_eq!(placed.icon, "bi-sort-up");

	let total = SortLink::new("total")
		.with_icon_type(IconType::Numeric)
		.with_base_url("/orders")
		.render(Some(&state), filter.settings());
	assert!(!total.active);
	assert_eq!(total.title, "Total");
	assert_eq!(
		total.to_html(),
		r#"<a class="link-dark" href="/orders?sort=total&amp;direction=asc" title="Sort">Total<span class="ms-1 bi-arrow-down-up"></span></a>"#
	);
}

#[rstest]
fn test_custom_parameter_names(registry: ModelRegistry) {
	let settings = SortSettings::new()
		.with_sort_param("order_by")
		.with_direction_param("dir")
		.with_default_direction(Order::Desc);
	let filter = OrderingFilter::new(&registry, "Order").with_settings(settings);
	let mut query = orders();

	let state = filter
		.filter_query_string("order_by=customer.name&sort=total", &mut query)
		.unwrap()
		.unwrap();

	assert_eq!(state.column, "customer.name");
	assert_eq!(state.direction, SortDirection::Desc);
	assert_eq!(query.joins().len(), 1);
}

#[rstest]
fn test_invalid_request_leaves_query_alone(registry: ModelRegistry) {
	let filter = OrderingFilter::new(&registry, "Order");
	let before = orders();

	for raw in ["sort=secret", "sort=customer..name", "sort=customer.ssn&direction=up"] {
		let mut query = before.clone();
		filter.filter_query_string(raw, &mut query).unwrap();
		assert_eq!(query, before, "{raw}");
	}
}

#[rstest]
fn test_state_serializes_for_api_responses() {
	let state = SortState {
		column: "customer.name".to_string(),
		direction: SortDirection::Desc,
		source: SortSource::Request,
	};

	let json = serde_json::to_value(&state).unwrap();

	assert_eq!(
		json,
		serde_json::json!({
			"column": "customer.name",
			"direction": "desc",
			"source": "request",
		})
	);
}

proptest! {
	#[test]
	fn prop_unknown_columns_never_touch_query(column in "[a-z]{1,8}(\\.[a-z]{1,8}){0,3}") {
		let registry = build_registry();
		let filter = OrderingFilter::new(&registry, "Order");
		let before = orders();
		let mut query = before.clone();
		let known = ["number", "total", "placed_at", "customer.name", "customer.address.city"];

		let params = HashMap::from([("sort".to_string(), column.clone())]);
		let result = filter.filter_query(&params, &mut query);

		match result {
			Ok(_) if known.contains(&column.as_str()) => prop_assert_eq!(query.orders().len(), 1),
			Ok(_) | Err(_) => prop_assert_eq!(query, before),
		}
	}
}
