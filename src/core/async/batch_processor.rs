//! Batch ingest with payer-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which ingests batches
//! of expense records concurrently by partitioning each batch by payer and
//! spawning a tokio task per payer.
//!
//! Balance aggregation is commutative, so ingest needs no ordering
//! guarantee for correctness; the partition simply spreads the split
//! computation across workers while keeping each payer's expenses in
//! their original order.

use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncSettlementEngine;
use crate::types::{ExpenseRecord, MemberId, SettleError};

/// Result of ingesting a single expense
///
/// Contains the original expense record and the result of processing it.
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// The expense record that was ingested
    pub record: ExpenseRecord,

    /// The result of ingest (success or error)
    pub result: Result<(), SettleError>,
}

/// Batch processor with payer-based partitioning
///
/// Cloneable and safe to share across async tasks; all state lives behind
/// the Arc-wrapped engine.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Thread-safe expense ingest engine
    engine: Arc<AsyncSettlementEngine>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `engine` - Arc-wrapped AsyncSettlementEngine for expense ingest
    pub fn new(engine: Arc<AsyncSettlementEngine>) -> Self {
        Self { engine }
    }

    /// Partition a batch of expenses by resolved payer
    ///
    /// # Returns
    ///
    /// A HashMap where keys are payer IDs and values are that payer's
    /// expenses in their original order.
    ///
    /// # Guarantees
    ///
    /// - Each expense appears in exactly one sub-batch
    /// - No expenses are lost or duplicated
    /// - Expenses for each payer maintain their original order
    pub fn partition_by_payer(
        &self,
        batch: Vec<ExpenseRecord>,
    ) -> HashMap<MemberId, Vec<ExpenseRecord>> {
        let mut payer_batches: HashMap<MemberId, Vec<ExpenseRecord>> = HashMap::new();

        for record in batch {
            payer_batches.entry(record.payer()).or_default().push(record);
        }

        payer_batches
    }

    /// Ingest all expenses for a single payer sequentially
    ///
    /// Errors are captured per expense and do not stop processing;
    /// results are returned in input order.
    pub async fn process_payer_expenses(
        &self,
        expenses: Vec<ExpenseRecord>,
    ) -> Vec<IngestResult> {
        let mut results = Vec::with_capacity(expenses.len());

        for record in expenses {
            let result = self.engine.process_expense(record.clone());
            results.push(IngestResult { record, result });
        }

        results
    }

    /// Ingest a batch of expenses with payer-based partitioning
    ///
    /// Partitions the batch by payer, spawns a tokio task per payer, and
    /// collects all results. Results may be in a different order than the
    /// input due to concurrent processing.
    pub async fn process_batch(&self, batch: Vec<ExpenseRecord>) -> Vec<IngestResult> {
        let payer_batches = self.partition_by_payer(batch);

        let mut tasks = Vec::new();
        for (_payer, expenses) in payer_batches {
            let processor = self.clone();
            let task =
                tokio::spawn(async move { processor.process_payer_expenses(expenses).await });
            tasks.push(task);
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(payer_results) => results.extend(payer_results),
                Err(e) => {
                    eprintln!("Task panicked: {:?}", e);
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directory::MemberDirectory;
    use crate::core::r#async::AsyncExpenseStore;
    use crate::types::{HouseholdProfile, MemberProfile, SplitMethod};
    use rust_decimal::Decimal;

    fn processor(members: &[u32]) -> BatchProcessor {
        let directory: MemberDirectory = members
            .iter()
            .map(|&id| {
                (
                    id,
                    MemberProfile {
                        name: format!("Member{}", id),
                        email: format!("member{}@example.com", id),
                    },
                )
            })
            .collect();
        let household = HouseholdProfile {
            members: members.to_vec(),
            member_weights: Vec::new(),
            default_split_method: SplitMethod::Equal,
        };
        let engine = Arc::new(AsyncSettlementEngine::new(
            Arc::new(directory),
            Arc::new(household),
            Arc::new(AsyncExpenseStore::new()),
        ));
        BatchProcessor::new(engine)
    }

    fn record(id: u64, owner: u32) -> ExpenseRecord {
        ExpenseRecord {
            id,
            amount: Decimal::new(1000, 2),
            method: SplitMethod::Equal,
            owner,
            paid_by: None,
            splits: Vec::new(),
        }
    }

    #[test]
    fn test_partition_empty_batch() {
        let processor = processor(&[1, 2]);

        let partitioned = processor.partition_by_payer(vec![]);

        assert_eq!(partitioned.len(), 0);
    }

    #[test]
    fn test_partition_groups_by_payer_and_keeps_order() {
        let processor = processor(&[1, 2]);

        let batch = vec![record(10, 1), record(20, 2), record(11, 1), record(12, 1)];
        let partitioned = processor.partition_by_payer(batch);

        assert_eq!(partitioned.len(), 2);
        let payer1: Vec<u64> = partitioned[&1].iter().map(|r| r.id).collect();
        assert_eq!(payer1, vec![10, 11, 12]);
        let payer2: Vec<u64> = partitioned[&2].iter().map(|r| r.id).collect();
        assert_eq!(payer2, vec![20]);
    }

    #[test]
    fn test_partition_uses_explicit_payer_over_owner() {
        let processor = processor(&[1, 2]);

        let mut rec = record(1, 1);
        rec.paid_by = Some(2);
        let partitioned = processor.partition_by_payer(vec![rec]);

        assert!(partitioned.contains_key(&2));
        assert!(!partitioned.contains_key(&1));
    }

    #[test]
    fn test_partition_loses_nothing() {
        let processor = processor(&[1, 2, 3]);

        let batch: Vec<ExpenseRecord> =
            (0..30).map(|i| record(i, (i % 3) as u32 + 1)).collect();
        let partitioned = processor.partition_by_payer(batch);

        let total: usize = partitioned.values().map(|v| v.len()).sum();
        assert_eq!(total, 30);
    }

    #[tokio::test]
    async fn test_process_payer_expenses_captures_errors() {
        let processor = processor(&[1, 2]);

        // Second record duplicates the first ID and must fail without
        // stopping the third
        let expenses = vec![record(1, 1), record(1, 1), record(2, 1)];
        let results = processor.process_payer_expenses(expenses).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].result.is_ok());
        assert!(matches!(
            results[1].result,
            Err(SettleError::DuplicateExpense { .. })
        ));
        assert!(results[2].result.is_ok());
    }

    #[tokio::test]
    async fn test_process_batch_ingests_everything() {
        let processor = processor(&[1, 2, 3]);

        let batch: Vec<ExpenseRecord> =
            (0..60).map(|i| record(i, (i % 3) as u32 + 1)).collect();
        let results = processor.process_batch(batch).await;

        assert_eq!(results.len(), 60);
        assert!(results.iter().all(|r| r.result.is_ok()));
    }

    #[tokio::test]
    async fn test_process_batch_empty() {
        let processor = processor(&[1]);

        let results = processor.process_batch(vec![]).await;

        assert!(results.is_empty());
    }
}
