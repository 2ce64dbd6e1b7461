use std::collections::HashMap;

/// General-purpose registers handed out to TAC names, in allocation order.
/// `rsp`/`rbp` are excluded; `rdi` doubles as the print argument register.
pub const REGISTER_POOL: [&str; 10] = [
    "rax", "rbx", "rcx", "rdx", "rsi", "rdi", "r8", "r9", "r10", "r11",
];

/// Picks the pool slot for a name that has never been allocated before.
/// Swapping the policy changes allocation without touching lowering.
pub trait AllocationPolicy {
    fn next_slot(&mut self, pool_size: usize) -> usize;
}

/// First-touch allocation in pool order; once the pool is exhausted the
/// cursor wraps around and the previous holder of the slot is evicted.
/// No liveness tracking and no spilling: a wrapped allocation can clobber
/// a value that is still needed.
#[derive(Debug, Default)]
pub struct WrapAround {
    cursor: usize,
}

impl AllocationPolicy for WrapAround {
    fn next_slot(&mut self, pool_size: usize) -> usize {
        let slot = self.cursor % pool_size;
        self.cursor += 1;
        slot
    }
}

/// Bidirectional name/register binding table. Fresh per compilation.
#[derive(Debug)]
pub struct RegisterAllocator<P = WrapAround> {
    policy: P,
    by_name: HashMap<String, &'static str>,
    by_register: HashMap<&'static str, String>,
}

impl RegisterAllocator<WrapAround> {
    pub fn new() -> Self {
        Self::with_policy(WrapAround::default())
    }
}

impl<P: AllocationPolicy> RegisterAllocator<P> {
    pub fn with_policy(policy: P) -> Self {
        Self {
            policy,
            by_name: HashMap::new(),
            by_register: HashMap::new(),
        }
    }

    /// Register currently bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.by_name.get(name).copied()
    }

    /// Return the binding for `name`, allocating one if it has none.
    /// Allocation may evict whatever name last held the chosen register.
    pub fn allocate(&mut self, name: &str) -> &'static str {
        if let Some(register) = self.get(name) {
            return register;
        }

        let slot = self.policy.next_slot(REGISTER_POOL.len());
        let register = REGISTER_POOL[slot];

        if let Some(evicted) = self.by_register.remove(register) {
            self.by_name.remove(&evicted);
        }
        self.by_name.insert(name.to_string(), register);
        self.by_register.insert(register, name.to_string());

        register
    }
}

impl Default for RegisterAllocator<WrapAround> {
    fn default() -> Self {
        Self::new()
    }
}
