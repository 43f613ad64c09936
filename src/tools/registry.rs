use std::collections::HashMap;
use std::sync::Arc;

use crate::core::tool::{Tool, ToolSpec};

/// Immutable-after-construction tool map. Built once at startup; lookups are
/// pure reads over a shared `Arc`, so no locking on the hot path.
#[derive(Clone)]
pub struct ToolRegistry {
    by_name: Arc<HashMap<&'static str, Arc<dyn Tool>>>,
}

/// Discovery view of one registered tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

impl ToolRegistry {
    pub fn with_tools<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let mut map: HashMap<&'static str, Arc<dyn Tool>> = HashMap::new();
        for t in iter {
            map.insert(t.name(), t);
        }
        Self { by_name: Arc::new(map) }
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.by_name.get(name).cloned()
    }

    /// Iteration order is not guaranteed to be stable across calls.
    pub fn list(&self) -> Vec<ToolMeta> {
        self.by_name
            .values()
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::ToolResult;
    use crate::core::tool::ToolError;
    use async_trait::async_trait;
    use serde_json::Value as J;
    use std::collections::BTreeSet;

    struct Echo;

    impl ToolSpec for Echo {
        fn name(&self) -> &'static str {
            "test_echo"
        }
        fn description(&self) -> &'static str {
            "echo tool"
        }
        fn input_schema(&self) -> J {
            serde_json::json!({"type":"object"})
        }
    }

    #[async_trait]
    impl Tool for Echo {
        async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::text(args.to_string()))
        }
    }

    #[tokio::test]
    async fn registry_lists_and_calls() {
        let reg = ToolRegistry::with_tools([Arc::new(Echo) as Arc<dyn Tool>]);
        let metas = reg.list();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].name, "test_echo");

        let tool = reg.lookup("test_echo").expect("registered");
        let out = tool.call(&serde_json::json!({"x": 2})).await.unwrap();
        assert!(!out.is_error);
    }

    #[test]
    fn lookup_miss_returns_none() {
        let reg = ToolRegistry::with_tools([Arc::new(Echo) as Arc<dyn Tool>]);
        assert!(reg.lookup("no_such_tool").is_none());
    }

    #[test]
    fn list_is_idempotent_as_a_set() {
        let reg = ToolRegistry::with_tools([Arc::new(Echo) as Arc<dyn Tool>]);
        let first: BTreeSet<_> = reg.list().into_iter().map(|m| m.name).collect();
        let second: BTreeSet<_> = reg.list().into_iter().map(|m| m.name).collect();
        assert_eq!(first, second);
    }
}
