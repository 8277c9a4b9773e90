//! 题目暂存区 - 会话状态
//!
//! 保存当前尚未导出的一批题目以及下一个题目编号。
//! 所有读写都在同一把锁内完成，锁不会跨越 `.await` 或文件 IO。

use crate::models::{Question, QuestionDraft};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct Batch {
    questions: Vec<Question>,
    next_id: u32,
}

impl Default for Batch {
    fn default() -> Self {
        Self {
            questions: Vec::new(),
            next_id: 1,
        }
    }
}

impl Batch {
    fn push(&mut self, draft: QuestionDraft) -> u32 {
        let id = self.next_id;
        self.questions.push(draft.into_question(id));
        self.next_id += 1;
        id
    }

    fn take(&mut self) -> Vec<Question> {
        std::mem::take(self).questions
    }
}

/// 同一时刻的批次概况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub next_id: u32,
    pub pending: usize,
}

/// 题目暂存区
///
/// 由 [`crate::server::AppState`] 持有并注入到各个请求处理函数中
#[derive(Debug, Default)]
pub struct QuestionStore {
    batch: Mutex<Batch>,
}

impl QuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // 每个临界区结束时批次都是一致的，锁中毒后可以直接继续使用
    fn lock(&self) -> MutexGuard<'_, Batch> {
        self.batch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 追加一道题，返回分配的编号
    pub fn append(&self, draft: QuestionDraft) -> u32 {
        self.lock().push(draft)
    }

    /// 取出全部题目并重置编号为 1
    pub fn snapshot_and_clear(&self) -> Vec<Question> {
        self.lock().take()
    }

    /// 追加最后一道题并取出整批，两步在同一个临界区内完成
    pub fn finalize(&self, draft: QuestionDraft) -> Vec<Question> {
        let mut batch = self.lock();
        batch.push(draft);
        batch.take()
    }

    /// 导出失败时把取出的题目放回批次最前面
    ///
    /// 导出期间新追加的题目排在其后，所有编号重新从 1 顺序分配
    pub fn restore(&self, taken: Vec<Question>) {
        if taken.is_empty() {
            return;
        }

        let mut batch = self.lock();
        let appended = std::mem::replace(&mut batch.questions, taken);
        batch.questions.extend(appended);

        for (index, question) in batch.questions.iter_mut().enumerate() {
            question.id = index as u32 + 1;
        }
        batch.next_id = batch.questions.len() as u32 + 1;
    }

    /// 下一道题将获得的编号
    pub fn next_id(&self) -> u32 {
        self.lock().next_id
    }

    pub fn len(&self) -> usize {
        self.lock().questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().questions.is_empty()
    }

    /// 在同一个临界区内读取编号和数量
    pub fn stats(&self) -> BatchStats {
        let batch = self.lock();
        BatchStats {
            next_id: batch.next_id,
            pending: batch.questions.len(),
        }
    }

    /// 当前批次的副本
    pub fn snapshot(&self) -> Vec<Question> {
        self.lock().questions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn draft(text: &str) -> QuestionDraft {
        QuestionDraft::new(text, 1.0, "easy", ["a", "b", "c", "d"].map(String::from), 1).unwrap()
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let store = QuestionStore::new();
        assert_eq!(store.next_id(), 1);
        assert!(store.is_empty());

        for expected in 1..=3 {
            let before = store.len();
            let id = store.append(draft("q"));
            assert_eq!(id, expected);
            assert_eq!(id as usize, before + 1);
            assert_eq!(store.len(), before + 1);
        }
        assert_eq!(store.next_id(), 4);
    }

    #[test]
    fn test_snapshot_and_clear_resets_counter() {
        let store = QuestionStore::new();
        store.append(draft("first"));
        store.append(draft("second"));

        let taken = store.snapshot_and_clear();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].text, "first");
        assert_eq!(taken[1].id, 2);

        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
        assert_eq!(store.append(draft("again")), 1);
    }

    #[test]
    fn test_finalize_includes_last_question() {
        let store = QuestionStore::new();
        store.append(draft("first"));

        let taken = store.finalize(draft("last"));
        let texts: Vec<&str> = taken.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "last"]);
        assert_eq!(taken[1].id, 2);
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_restore_puts_batch_back_unchanged() {
        let store = QuestionStore::new();
        store.append(draft("first"));
        store.append(draft("second"));
        let before = store.snapshot();

        let taken = store.snapshot_and_clear();
        store.restore(taken);

        assert_eq!(store.snapshot(), before);
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn test_restore_renumbers_questions_added_meanwhile() {
        let store = QuestionStore::new();
        store.append(draft("first"));
        let taken = store.snapshot_and_clear();

        // 导出期间有新提交
        assert_eq!(store.append(draft("meanwhile")), 1);

        store.restore(taken);
        let batch = store.snapshot();
        assert_eq!(batch[0].text, "first");
        assert_eq!(batch[0].id, 1);
        assert_eq!(batch[1].text, "meanwhile");
        assert_eq!(batch[1].id, 2);
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn test_stats_consistent_under_concurrent_appends() {
        let store = Arc::new(QuestionStore::new());
        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..500 {
                    store.append(draft("q"));
                }
            })
        };

        for _ in 0..500 {
            let stats = store.stats();
            assert_eq!(stats.next_id as usize, stats.pending + 1);
        }
        writer.join().unwrap();

        assert_eq!(
            store.stats(),
            BatchStats {
                next_id: 501,
                pending: 500
            }
        );
    }

    #[test]
    fn test_concurrent_appends_get_unique_ids() {
        let store = Arc::new(QuestionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || (0..25).map(|_| store.append(draft("q"))).collect::<Vec<_>>())
            })
            .collect();

        let mut ids: Vec<u32> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();

        assert_eq!(ids, (1..=200).collect::<Vec<u32>>());
        assert_eq!(store.next_id(), 201);
    }
}
