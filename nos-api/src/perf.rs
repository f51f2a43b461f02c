//! Performance monitoring and optimization module
//!
//! This module provides interfaces and types for performance monitoring,
//! profiling, and optimization in the NOS operating system.

use core::time::Duration;

/// Performance metrics for system components
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    /// Total execution time
    pub total_time: Duration,
    /// Number of operations
    pub operation_count: u64,
    /// Average time per operation
    pub avg_time_per_operation: Duration,
    /// Peak memory usage
    pub peak_memory_usage: usize,
    /// Current memory usage
    pub current_memory_usage: usize,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            total_time: Duration::from_nanos(0),
            operation_count: 0,
            avg_time_per_operation: Duration::from_nanos(0),
            peak_memory_usage: 0,
            current_memory_usage: 0,
        }
    }
}

impl PerformanceMetrics {
    /// Create new performance metrics
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Update metrics with a new operation
    pub fn update(&mut self, duration: Duration, memory_usage: usize) {
        self.total_time += duration;
        self.operation_count += 1;
        if self.operation_count > 0 {
            self.avg_time_per_operation = 
                Duration::from_nanos((self.total_time.as_nanos() / self.operation_count as u128).try_into().unwrap());
        }
        
        if memory_usage > self.peak_memory_usage {
            self.peak_memory_usage = memory_usage;
        }
        self.current_memory_usage = memory_usage;
    }
    
    /// Reset metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Performance profiler for system components
pub trait Profiler {
    /// Start profiling
    fn start(&mut self);
    
    /// Stop profiling and return metrics
    fn stop(&mut self) -> PerformanceMetrics;
    
    /// Get current metrics without stopping
    fn get_metrics(&self) -> &PerformanceMetrics;
}

/// Simple implementation of a profiler
#[derive(Debug)]
pub struct SimpleProfiler {
    metrics: PerformanceMetrics,
    start_time: Option<Duration>,
    is_running: bool,
}

impl SimpleProfiler {
    /// Create a new simple profiler
    pub fn new() -> Self {
        Self {
            metrics: PerformanceMetrics::new(),
            start_time: None,
            is_running: false,
        }
    }
}

impl Default for SimpleProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler for SimpleProfiler {
    fn start(&mut self) {
        if !self.is_running {
            // In a real implementation, we would get the current time
            // For now, we'll use a placeholder
            self.start_time = Some(Duration::from_nanos(0));
            self.is_running = true;
        }
    }
    
    fn stop(&mut self) -> PerformanceMetrics {
        if self.is_running {
            if let Some(_start) = self.start_time {
                // In a real implementation, we would calculate the actual duration
                let duration = Duration::from_nanos(1000); // Placeholder
                self.metrics.update(duration, self.metrics.current_memory_usage);
            }
            self.start_time = None;
            self.is_running = false;
        }
        self.metrics.clone()
    }
    
    fn get_metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }
}