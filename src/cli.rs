use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::{ExportRequest, RiskInput, RiskQueryRequest};
use crate::shared::Result;

/// Score, track and export organizational risks
#[derive(Parser, Debug)]
#[command(name = "risk-register")]
#[command(version)]
#[command(
    about = "Score, track and export organizational risks on a 5x5 likelihood/impact matrix",
    long_about = None
)]
pub struct Args {
    /// Path of the JSON risk store (default: risks.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Config file path (default: ./risk-register.config.yml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses the process arguments, leaving the exit decision to the caller
    pub fn try_parse_args() -> std::result::Result<Self, clap::Error> {
        Self::try_parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new risk
    Create {
        #[command(flatten)]
        fields: RiskFields,
    },
    /// Show one risk
    Show {
        /// Risk id
        id: String,
    },
    /// Change some fields of a risk
    Update {
        /// Risk id
        id: String,
        #[command(flatten)]
        fields: RiskFields,
    },
    /// Delete a risk
    Delete {
        /// Risk id
        id: String,
    },
    /// List one page of risks
    List {
        #[command(flatten)]
        query: QueryArgs,
        /// Page number, starting at 1
        #[arg(long)]
        page: Option<String>,
        /// Records per page (clamped to 1..=100)
        #[arg(long)]
        page_size: Option<String>,
        /// Print the page as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Export every matching risk as JSON or CSV
    Export {
        #[command(flatten)]
        query: QueryArgs,
        /// Export format: json or csv
        #[arg(short, long)]
        format: Option<String>,
        /// Output file, or a directory to place the dated export file in
        /// (if not specified, outputs to stdout)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show the 5x5 likelihood/impact matrix
    Matrix {
        #[command(flatten)]
        query: QueryArgs,
        /// Print the matrix as JSON instead of a grid
        #[arg(long)]
        json: bool,
    },
    /// Show risk counts per band and per status
    Summary {
        #[command(flatten)]
        query: QueryArgs,
        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Fields of a create or update request
///
/// Ratings are taken as text so that out-of-range or non-numeric values are
/// reported by validation together with every other bad field.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct RiskFields {
    /// JSON object with the request fields; flags override its values
    #[arg(long, value_name = "JSON")]
    pub data: Option<String>,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub owner: Option<String>,

    /// Likelihood rating, 1-5
    #[arg(short, long)]
    pub likelihood: Option<String>,

    /// Impact rating, 1-5
    #[arg(short, long)]
    pub impact: Option<String>,

    /// Open, Monitoring or Closed
    #[arg(short, long)]
    pub status: Option<String>,
}

impl RiskFields {
    pub fn into_input(self) -> Result<RiskInput> {
        let mut input = match self.data.as_deref() {
            Some(body) => RiskInput::from_json(body)?,
            None => RiskInput::new(),
        };

        if let Some(title) = self.title {
            input = input.with_title(title);
        }
        if let Some(description) = self.description {
            input = input.with_description(description);
        }
        if let Some(category) = self.category {
            input = input.with_category(category);
        }
        if let Some(owner) = self.owner {
            input = input.with_owner(owner);
        }
        if let Some(likelihood) = self.likelihood {
            input = input.with_likelihood(likelihood);
        }
        if let Some(impact) = self.impact {
            input = input.with_impact(impact);
        }
        if let Some(status) = self.status {
            input = input.with_status(status);
        }

        Ok(input)
    }
}

/// Filter and sort options shared by list, export, matrix and summary
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct QueryArgs {
    /// URL-style query string, e.g. "band=High&search=server"; flags override it
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Low, Moderate, High, Critical or all
    #[arg(short, long)]
    pub band: Option<String>,

    /// Open, Monitoring, Closed or all
    #[arg(short, long)]
    pub status: Option<String>,

    /// Case-insensitive text searched in title and description
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub owner: Option<String>,

    /// severity or updatedAt
    #[arg(long)]
    pub sort_by: Option<String>,

    /// asc or desc
    #[arg(long)]
    pub order: Option<String>,
}

impl QueryArgs {
    pub fn into_request(self) -> Result<RiskQueryRequest> {
        let mut request = match self.query.as_deref() {
            Some(query) => RiskQueryRequest::from_query_string(query)?,
            None => RiskQueryRequest::new(),
        };

        overlay(&mut request.band, self.band);
        overlay(&mut request.status, self.status);
        overlay(&mut request.search, self.search);
        overlay(&mut request.category, self.category);
        overlay(&mut request.owner, self.owner);
        overlay(&mut request.sort_by, self.sort_by);
        overlay(&mut request.order, self.order);

        Ok(request)
    }

    pub fn into_export_request(self, format: Option<String>) -> Result<ExportRequest> {
        let base = match self.query.as_deref() {
            Some(query) => ExportRequest::from_query_string(query)?,
            None => ExportRequest::default(),
        };
        let format = format.or(base.format);
        Ok(ExportRequest::new(self.into_request()?, format))
    }
}

fn overlay(target: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *target = value;
    }
}
