use log::debug;

use super::regs::{PReg, TEMP_POOL};

/// 为IR值分配物理寄存器
///
/// 代码生成只通过这个接口拿寄存器，换成带活跃性分析的分配器时不必改动调用点。
pub trait RegAllocator {
    /// 进入新函数时调用
    fn reset(&mut self);

    /// 分配一个目标寄存器
    fn alloc(&mut self) -> PReg;
}

/// 固定寄存器池上的轮转分配，不做活跃性分析
///
/// 同一函数内第N次与第N+池大小次分配得到同一个寄存器，前一个值若仍被后续指令使用就会被覆盖。
#[derive(Debug, Clone)]
pub struct RoundRobinAllocator {
    pool: &'static [PReg],
    cursor: usize,
}

impl Default for RoundRobinAllocator {
    fn default() -> Self {
        Self::new(&TEMP_POOL)
    }
}

impl RoundRobinAllocator {
    pub fn new(pool: &'static [PReg]) -> Self {
        assert!(!pool.is_empty(), "register pool must not be empty");
        Self { pool, cursor: 0 }
    }
}

impl RegAllocator for RoundRobinAllocator {
    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn alloc(&mut self) -> PReg {
        let reg = self.pool[self.cursor % self.pool.len()];
        if self.cursor == self.pool.len() {
            debug!(
                "register pool of {} exhausted, reusing from {}",
                self.pool.len(),
                reg
            );
        }
        self.cursor += 1;
        reg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::regs::{a7, t0, t1};

    #[test]
    fn hands_out_pool_in_order() {
        let mut alloc = RoundRobinAllocator::default();
        let regs: Vec<PReg> = (0..TEMP_POOL.len()).map(|_| alloc.alloc()).collect();
        assert_eq!(regs, TEMP_POOL);
        assert_eq!(alloc.cursor, 15);
    }

    #[test]
    fn wraps_after_fifteen() {
        let mut alloc = RoundRobinAllocator::default();
        let regs: Vec<PReg> = (0..50).map(|_| alloc.alloc()).collect();
        for n in 0..regs.len() - 15 {
            assert_eq!(regs[n], regs[n + 15]);
        }
        assert_eq!(regs[14], a7());
        assert_eq!(regs[15], t0());
    }

    #[test]
    fn reset_restarts_the_cursor() {
        let mut alloc = RoundRobinAllocator::default();
        alloc.alloc();
        alloc.alloc();
        alloc.reset();
        assert_eq!(alloc.alloc(), t0());
        assert_eq!(alloc.alloc(), t1());
    }
}
