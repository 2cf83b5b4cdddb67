//! Fault injection wrapper
//!
//! Simulates an unavailable or flaky backing store. Rules are checked in
//! insertion order; the first rule matching an operation decides whether
//! the call fails.

use crate::traits::Store;
use dirsearch_core::{Error, Result};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Store operation that a fault rule targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultOp {
    /// Scalar get
    Get,
    /// Scalar set
    Set,
    /// Key delete
    Delete,
    /// Hash field get
    HGet,
    /// Hash field set
    HSet,
    /// Hash field delete
    HDel,
    /// Hash field enumeration
    HKeys,
    /// Hash value enumeration
    HVals,
    /// Hash pair enumeration
    HGetAll,
    /// Set add
    SAdd,
    /// Set remove
    SRem,
    /// Set enumeration
    SMembers,
    /// Set cardinality
    SCard,
    /// Every operation
    Any,
}

impl FaultOp {
    fn matches(self, op: FaultOp) -> bool {
        self == FaultOp::Any || self == op
    }
}

#[derive(Debug)]
struct FaultRule {
    op: FaultOp,
    /// Calls still allowed to succeed before the rule starts failing
    remaining_ok: usize,
}

/// Store wrapper that fails chosen operations
pub struct FaultyStore<S> {
    inner: S,
    rules: Mutex<Vec<FaultRule>>,
    injected: AtomicUsize,
}

impl<S: Store> FaultyStore<S> {
    /// Wrap a store with no fault rules
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            rules: Mutex::new(Vec::new()),
            injected: AtomicUsize::new(0),
        }
    }

    /// Fail every call of `op`
    pub fn fail(&self, op: FaultOp) {
        self.fail_after(op, 0);
    }

    /// Let `ok_calls` calls of `op` succeed, then fail every later one
    pub fn fail_after(&self, op: FaultOp, ok_calls: usize) {
        self.rules.lock().push(FaultRule {
            op,
            remaining_ok: ok_calls,
        });
    }

    /// Remove every fault rule
    pub fn heal(&self) {
        self.rules.lock().clear();
    }

    /// Number of calls that were failed so far
    pub fn injected_faults(&self) -> usize {
        self.injected.load(Ordering::Acquire)
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn check(&self, op: FaultOp) -> Result<()> {
        let mut rules = self.rules.lock();
        if let Some(rule) = rules.iter_mut().find(|r| r.op.matches(op)) {
            if rule.remaining_ok > 0 {
                rule.remaining_ok -= 1;
            } else {
                self.injected.fetch_add(1, Ordering::AcqRel);
                return Err(Error::StoreUnavailable(format!("injected fault on {:?}", op)));
            }
        }
        Ok(())
    }
}

impl<S: Store> Store for FaultyStore<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check(FaultOp::Get)?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check(FaultOp::Set)?;
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        self.check(FaultOp::Delete)?;
        self.inner.delete(key)
    }

    fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        self.check(FaultOp::HGet)?;
        self.inner.hget(key, field)
    }

    fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
        self.check(FaultOp::HSet)?;
        self.inner.hset(key, field, value)
    }

    fn hdel(&self, key: &str, field: &str) -> Result<bool> {
        self.check(FaultOp::HDel)?;
        self.inner.hdel(key, field)
    }

    fn hkeys(&self, key: &str) -> Result<Vec<String>> {
        self.check(FaultOp::HKeys)?;
        self.inner.hkeys(key)
    }

    fn hvals(&self, key: &str) -> Result<Vec<String>> {
        self.check(FaultOp::HVals)?;
        self.inner.hvals(key)
    }

    fn hgetall(&self, key: &str) -> Result<Vec<(String, String)>> {
        self.check(FaultOp::HGetAll)?;
        self.inner.hgetall(key)
    }

    fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        self.check(FaultOp::SAdd)?;
        self.inner.sadd(key, member)
    }

    fn srem(&self, key: &str, member: &str) -> Result<bool> {
        self.check(FaultOp::SRem)?;
        self.inner.srem(key, member)
    }

    fn smembers(&self, key: &str) -> Result<HashSet<String>> {
        self.check(FaultOp::SMembers)?;
        self.inner.smembers(key)
    }

    fn scard(&self, key: &str) -> Result<usize> {
        self.check(FaultOp::SCard)?;
        self.inner.scard(key)
    }
}
