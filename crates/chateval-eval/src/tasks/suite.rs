//! Task-suite evaluator
//!
//! Turns task documents into model requests, sends each task's requests as
//! one batch, and reduces the results to per-task metrics.

use std::collections::BTreeMap;

use anyhow::{Result, ensure};
use async_trait::async_trait;
use chateval_core::{
    GenerationOptions, GenerationRequest, LanguageModel, LikelihoodRequest, RollingRequest,
};
use serde_json::{Value, json};
use tracing::{debug, info};

use super::document::TARGET_DELIMITER;
use super::metrics::{argmax, mean, normalized, proportion_stderr};
use super::{Task, TaskDocument, TaskKind, TaskLoader};
use crate::runner::{EvaluationRequest, Evaluator, TaskResults};

type Metrics = BTreeMap<String, Value>;

/// Evaluator over JSONL tasks from a [`TaskLoader`]
#[derive(Debug, Clone)]
pub struct TaskSuiteEvaluator {
    loader: TaskLoader,
}

impl TaskSuiteEvaluator {
    pub fn new(loader: TaskLoader) -> Self {
        Self { loader }
    }

    async fn evaluate_task(
        &self,
        model: &dyn LanguageModel,
        task: &Task,
        request: &EvaluationRequest,
    ) -> Result<Metrics> {
        let count = request
            .limit
            .map_or(task.documents.len(), |limit| limit.min(task.documents.len()));
        let documents = &task.documents[..count];

        info!(task = %task.name, kind = %task.kind, documents = count, "Evaluating task");

        let mut metrics = match task.kind {
            TaskKind::MultipleChoice => {
                score_multiple_choice(model, task, documents, request).await?
            }
            TaskKind::Generation => score_generation(model, task, documents, request).await?,
            TaskKind::Rolling => score_rolling(model, documents).await?,
        };

        metrics.insert("alias".to_string(), json!(task.name));
        metrics.insert("samples".to_string(), json!(count));
        debug!(task = %task.name, ?metrics, "Task metrics");
        Ok(metrics)
    }
}

#[async_trait]
impl Evaluator for TaskSuiteEvaluator {
    async fn simple_evaluate(
        &self,
        model: &dyn LanguageModel,
        request: &EvaluationRequest,
    ) -> Result<TaskResults> {
        // Load everything first so a bad task name fails before any request is sent
        let tasks = request
            .tasks
            .iter()
            .map(|name| self.loader.load(name))
            .collect::<Result<Vec<_>>>()?;

        let mut results = TaskResults::new();
        for task in &tasks {
            let metrics = self.evaluate_task(model, task, request).await?;
            results.insert(task.name.clone(), metrics);
        }
        Ok(results)
    }
}

async fn score_multiple_choice(
    model: &dyn LanguageModel,
    task: &Task,
    documents: &[TaskDocument],
    request: &EvaluationRequest,
) -> Result<Metrics> {
    let mut requests = Vec::new();
    let mut spans = Vec::with_capacity(documents.len());

    for (index, document) in documents.iter().enumerate() {
        if let TaskDocument::MultipleChoice {
            query,
            choices,
            gold,
        } = document
        {
            let context = format!("{}{}", task.fewshot_prefix(index, request.num_fewshot), query);
            let start = requests.len();
            for choice in choices {
                requests.push(LikelihoodRequest::new(
                    context.clone(),
                    format!("{}{}", TARGET_DELIMITER, choice),
                ));
            }
            spans.push((start..requests.len(), *gold, choices.as_slice()));
        }
    }

    let results = model.estimate_likelihoods(&requests).await;
    ensure!(
        results.len() == requests.len(),
        "model returned {} likelihoods for {} requests",
        results.len(),
        requests.len()
    );

    let mut correct = Vec::with_capacity(spans.len());
    let mut correct_norm = Vec::with_capacity(spans.len());

    for (span, gold, choices) in spans {
        let scores: Vec<f64> = results[span].iter().map(|r| r.score).collect();
        let normalized_scores: Vec<f64> = choices
            .iter()
            .zip(&scores)
            .map(|(choice, &score)| normalized(score, choice))
            .collect();

        correct.push(indicator(argmax(&scores) == Some(gold)));
        correct_norm.push(indicator(argmax(&normalized_scores) == Some(gold)));
    }

    let mut metrics = Metrics::new();
    insert_rate(&mut metrics, "acc", &correct, request.bootstrap_iters);
    insert_rate(&mut metrics, "acc_norm", &correct_norm, request.bootstrap_iters);
    Ok(metrics)
}

async fn score_generation(
    model: &dyn LanguageModel,
    task: &Task,
    documents: &[TaskDocument],
    request: &EvaluationRequest,
) -> Result<Metrics> {
    let budget = model.max_length().saturating_sub(model.max_gen_toks());
    let max_tokens = u32::try_from(model.max_gen_toks()).unwrap_or(u32::MAX);

    let mut requests = Vec::with_capacity(documents.len());
    let mut targets = Vec::with_capacity(documents.len());

    for (index, document) in documents.iter().enumerate() {
        if let TaskDocument::Generation {
            query,
            target,
            until,
        } = document
        {
            let context = format!("{}{}", task.fewshot_prefix(index, request.num_fewshot), query);
            let options = GenerationOptions::default()
                .with_max_tokens(max_tokens)
                .with_temperature(0.0)
                .with_stop_sequences(until.clone());
            requests.push(GenerationRequest::new(
                truncate_left(model, &context, budget),
                options,
            ));
            targets.push(target.as_str());
        }
    }

    let results = model.generate(&requests).await;
    ensure!(
        results.len() == requests.len(),
        "model returned {} generations for {} requests",
        results.len(),
        requests.len()
    );

    let matches: Vec<f64> = results
        .iter()
        .zip(&targets)
        .map(|(result, target)| indicator(result.text.trim() == target.trim()))
        .collect();

    let mut metrics = Metrics::new();
    insert_rate(&mut metrics, "exact_match", &matches, request.bootstrap_iters);
    Ok(metrics)
}

async fn score_rolling(model: &dyn LanguageModel, documents: &[TaskDocument]) -> Result<Metrics> {
    let requests: Vec<RollingRequest> = documents
        .iter()
        .map(|doc| RollingRequest::new(doc.query()))
        .collect();

    let scores = model.estimate_rolling_likelihood(&requests).await;
    ensure!(
        scores.len() == requests.len(),
        "model returned {} rolling scores for {} requests",
        scores.len(),
        requests.len()
    );

    let mut metrics = Metrics::new();
    metrics.insert("loglikelihood".to_string(), json!(mean(&scores)));
    Ok(metrics)
}

fn indicator(hit: bool) -> f64 {
    if hit { 1.0 } else { 0.0 }
}

fn insert_rate(metrics: &mut Metrics, name: &str, outcomes: &[f64], bootstrap_iters: u32) {
    let rate = mean(outcomes);
    metrics.insert(name.to_string(), json!(rate));
    if bootstrap_iters > 0 {
        metrics.insert(
            format!("{}_stderr", name),
            json!(proportion_stderr(rate, outcomes.len())),
        );
    }
}

/// Drop leading characters until the model's token estimate fits `budget`.
fn truncate_left(model: &dyn LanguageModel, context: &str, budget: usize) -> String {
    let total = model.encode(context).len();
    if total <= budget {
        return context.to_string();
    }

    let offsets: Vec<usize> = context.char_indices().map(|(i, _)| i).collect();
    let char_count = offsets.len();
    let mut drop = char_count * (total - budget) / total;

    loop {
        let start = offsets.get(drop).copied().unwrap_or(context.len());
        let rest = &context[start..];
        if drop >= char_count || model.encode(rest).len() <= budget {
            debug!(dropped_chars = drop, "Truncated context to fit model length");
            return rest.to_string();
        }
        drop += 1;
    }
}
