// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run the four collection passes (filed, closed, commented, tested) against the tracker and fill the store
// role: orchestration/pipeline
// inputs: EffectiveConfig; IssueTracker implementation
// outputs: AggregationStore ready for rendering
// side_effects: One tracker search per pass; progress logged via tracing
// invariants:
// - Passes run strictly in Pass::ORDER; each pass sees the store left by the previous one
// - Any fault aborts the run before rendering
// errors: ReportError from search/parse/classify, wrapped with the failing pass via anyhow::Context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};

use crate::classify::{self, ClassifyContext};
use crate::cli::EffectiveConfig;
use crate::error::ReportError;
use crate::model::Issue;
use crate::search::SearchPlan;
use crate::store::AggregationStore;
use crate::tracker::{Histories, IssueTracker, SearchOptions, parse_issues};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
  Filed,
  Closed,
  Commented,
  Tested,
}

type Rule = fn(&mut AggregationStore, &Issue, &ClassifyContext) -> Result<(), ReportError>;

impl Pass {
  pub const ORDER: [Pass; 4] = [Pass::Filed, Pass::Closed, Pass::Commented, Pass::Tested];

  pub fn label(self) -> &'static str {
    match self {
      Pass::Filed => "filed",
      Pass::Closed => "closed",
      Pass::Commented => "commented",
      Pass::Tested => "tested",
    }
  }

  /// Only passes that walk the changelog need every history entry to be readable.
  pub fn histories(self) -> Histories {
    match self {
      Pass::Closed | Pass::Tested => Histories::Strict,
      Pass::Filed | Pass::Commented => Histories::Lenient,
    }
  }

  fn rule(self) -> Rule {
    match self {
      Pass::Filed => classify::classify_filed,
      Pass::Closed => classify::classify_closed,
      Pass::Commented => classify::classify_commented,
      Pass::Tested => classify::classify_tested,
    }
  }
}

/// Search, parse and classify one pass, handing the store back.
pub fn run_pass(
  api: &dyn IssueTracker,
  pass: Pass,
  jql: &str,
  options: &SearchOptions,
  story_points_field: &str,
  ctx: &ClassifyContext,
  mut store: AggregationStore,
) -> Result<AggregationStore> {
  tracing::info!("Retrieving {} tickets...", pass.label());
  tracing::debug!(jql, "search");

  let page = api.search(jql, options)?;
  let issues = parse_issues(&page, story_points_field, pass.histories())?;

  tracing::info!("Processing {} {} tickets", issues.len(), pass.label());

  let rule = pass.rule();
  for issue in &issues {
    rule(&mut store, issue, ctx)?;
  }

  Ok(store)
}

pub fn collect(api: &dyn IssueTracker, cfg: &EffectiveConfig) -> Result<AggregationStore> {
  tracing::info!("Begin data collection");
  tracing::info!("Start date: {}", cfg.window.start_datetime());
  tracing::info!("End date: {}", cfg.window.end_datetime());

  let plan = SearchPlan::build(cfg.users.as_slice(), &cfg.group, &cfg.window)?;
  let options = SearchOptions::new(cfg.max_results, &cfg.story_points_field);
  let ctx = ClassifyContext::new(&cfg.window, cfg.unlisted);

  let mut store = AggregationStore::initialize(cfg.users.as_slice());
  for pass in Pass::ORDER {
    store = run_pass(
      api,
      pass,
      plan.query(pass),
      &options,
      &cfg.story_points_field,
      &ctx,
      store,
    )
    .with_context(|| format!("{} pass", pass.label()))?;
  }

  tracing::info!(users = store.len(), "data collection complete");
  Ok(store)
}
