//! Tool-call interface over the revenue aggregator.
//!
//! Two tools are exposed. Each takes string arguments and answers with a
//! pretty-printed JSON report.

use crate::aggregator::RevenueAggregator;
use crate::source::{CustomerSource, SalesSource};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Name of the per-customer revenue tool.
pub const CUSTOMER_REVENUE_TOOL: &str = "get_customer_revenue_by_period";

/// Name of the per-city revenue tool.
pub const CITY_REVENUE_TOOL: &str = "get_city_revenue_by_period";

/// Errors raised while dispatching a tool call.
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool with this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments were present but not of the expected shape.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[source] serde_json::Error),

    /// Report could not be encoded.
    #[error("Failed to encode report: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Description of a tool as advertised to callers.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Arguments of [`CUSTOMER_REVENUE_TOOL`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerRevenueArgs {
    #[serde(alias = "cust_id")]
    pub customer_id: String,
    pub start_date: String,
    pub end_date: String,
}

/// Arguments of [`CITY_REVENUE_TOOL`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CityRevenueArgs {
    pub city: String,
    pub start_date: String,
    pub end_date: String,
}

fn period_schema(subject: &str, subject_description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            subject: { "type": "string", "description": subject_description },
            "start_date": {
                "type": "string",
                "description": "Start date in yyyymmdd format (e.g. \"20260101\")"
            },
            "end_date": {
                "type": "string",
                "description": "End date in yyyymmdd format (e.g. \"20260131\")"
            }
        },
        "required": [subject, "start_date", "end_date"]
    })
}

/// All tools this server offers.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: CUSTOMER_REVENUE_TOOL,
            description: "Get customer revenue for a specified period. Returns the customer's \
                          id, name, city, total revenue and number of sales in the date range.",
            input_schema: period_schema("customer_id", "Customer ID (e.g. \"012\")"),
        },
        ToolDefinition {
            name: CITY_REVENUE_TOOL,
            description: "Get revenue for all customers in a city for a specified period. \
                          Includes customers with zero revenue.",
            input_schema: period_schema("city", "City name (e.g. \"Eindhoven\")"),
        },
    ]
}

/// Missing arguments behave like an empty object.
fn parse_args<T: DeserializeOwned + Default>(arguments: Value) -> Result<T, ToolError> {
    if arguments.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(arguments).map_err(ToolError::InvalidArguments)
}

impl<C, S> RevenueAggregator<C, S>
where
    C: CustomerSource,
    S: SalesSource,
{
    /// Run the named tool and return its JSON-encoded report.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        match name {
            CUSTOMER_REVENUE_TOOL => {
                let args: CustomerRevenueArgs = parse_args(arguments)?;
                let report = self
                    .customer_revenue(&args.customer_id, &args.start_date, &args.end_date)
                    .await;
                serde_json::to_string_pretty(&report).map_err(ToolError::Encode)
            }
            CITY_REVENUE_TOOL => {
                let args: CityRevenueArgs = parse_args(arguments)?;
                let report = self
                    .city_revenue(&args.city, &args.start_date, &args.end_date)
                    .await;
                serde_json::to_string_pretty(&report).map_err(ToolError::Encode)
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}
