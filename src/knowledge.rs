// Retrieval capability - knowledge base search backing the rag_search tool

use crate::tools::{Tool, ToolError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Embedded supply chain reference corpus, split on `## ` section headers
/// at index time. Stands in for the external vector index in production.
const SUPPLY_CHAIN_KNOWLEDGE: &str = "\
## Supply Chain Fundamentals

Supply chain management encompasses the planning and management of all activities involved \
in sourcing, procurement, conversion, and logistics. A typical supply chain consists of \
suppliers, manufacturers, distributors, retailers, and end customers, with materials, \
information, and finances flowing through these entities in both directions. Effective \
management requires visibility across all components to optimize performance, reduce costs, \
and mitigate risks. Key performance indicators include cost efficiency, delivery \
performance, quality metrics, flexibility, and sustainability measures.

## Risk Management

Supply chain risk management involves identifying, assessing, and mitigating potential \
disruptions. Risks fall into operational (supplier failures, quality issues), financial \
(currency fluctuations, credit risks), strategic (competitive pressures, regulatory \
changes), and external (natural disasters, geopolitical events) categories. High-probability \
high-impact risks require robust mitigation: supplier diversification, safety stock \
management, alternative sourcing, and business continuity planning. Resilience is built \
through redundancy, flexibility, and visibility.

## Supplier Evaluation and Management

Supplier evaluation assesses quality capabilities, delivery performance, financial \
stability, technical competencies, and strategic alignment. Selection should consider \
total cost of ownership rather than purchase price alone, including transportation, \
inventory carrying, quality, and risk-related costs. Ongoing management uses supplier \
scorecards tracking on-time delivery, quality ratings, cost performance, and responsiveness.

## Logistics and Transportation

Logistics covers the planning, implementation, and control of the movement and storage of \
goods, services, and information. Road transport offers flexibility but higher long-distance \
cost; rail is cost-effective for bulk; air enables fast delivery at premium cost; ocean \
freight has the lowest unit cost for international shipments but the longest transit times. \
Network design optimizes the number, location, and capacity of distribution facilities.

## Inventory Management

Inventory management balances holding costs against stockout risk across raw materials, \
work-in-progress, and finished goods. Classical models include Economic Order Quantity for \
order sizing and reorder point systems for replenishment timing. ABC analysis categorizes \
inventory by value contribution; safety stock calculations consider demand variability, \
lead time uncertainty, and desired service levels.

## Technology in Supply Chain

ERP systems provide integrated platforms for managing business processes; SCM software adds \
specialized planning and optimization. IoT devices, RFID, and GPS provide real-time \
visibility into inventory and shipments. AI and machine learning support demand forecasting, \
route optimization, predictive maintenance, and automated decision-making.

## Sustainability and ESG

Environmental, Social, and Governance considerations span carbon footprint reduction, waste \
minimization, and circular economy principles; labor practices, human rights, and ethical \
sourcing; and compliance management, risk oversight, and stakeholder engagement. Supplier \
codes of conduct address working conditions, fair wages, and safety standards.

## Compliance and Regulations

Supply chain compliance covers trade regulations (customs, tariffs, free trade agreements), \
product safety standards, environmental regulations, and labor laws. Industry-specific \
regimes apply to pharmaceuticals, food, automotive, and chemicals (REACH, OSHA). Quality \
management systems like ISO 9001 provide frameworks for consistent assurance across the \
chain. Non-compliance can cause penalties, delays, and reputational damage.

## Global Supply Chain Considerations

Global chains offer market access and cost advantages but add complexity: currency \
fluctuations, political risks, sanctions, cultural differences, time zones, and uneven \
infrastructure. These factors must be considered in network design and contingency planning.";

/// The retrieval capability: opaque text search over a knowledge store
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn search(&self, query: &str) -> String;
}

/// In-process keyword retriever over the embedded corpus.
///
/// Sections are indexed lazily on first use; an empty corpus degrades to an
/// explicit error string instead of failing the caller.
pub struct StaticKnowledgeBase {
    sections: OnceCell<Vec<Section>>,
    corpus: &'static str,
    top_k: usize,
}

struct Section {
    title: String,
    body: String,
}

impl StaticKnowledgeBase {
    pub fn new() -> Self {
        Self {
            sections: OnceCell::new(),
            corpus: SUPPLY_CHAIN_KNOWLEDGE,
            top_k: 2,
        }
    }

    fn index(corpus: &str) -> Vec<Section> {
        corpus
            .split("## ")
            .filter(|chunk| !chunk.trim().is_empty())
            .map(|chunk| {
                let (title, body) = chunk.split_once('\n').unwrap_or((chunk, ""));
                Section {
                    title: title.trim().to_string(),
                    body: body.trim().to_string(),
                }
            })
            .collect()
    }

    fn score(section: &Section, terms: &[String]) -> usize {
        let haystack = format!("{} {}", section.title, section.body).to_lowercase();
        terms.iter().filter(|term| haystack.contains(term.as_str())).count()
    }
}

impl Default for StaticKnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeBase for StaticKnowledgeBase {
    async fn search(&self, query: &str) -> String {
        let sections = self.sections.get_or_init(|| async { Self::index(self.corpus) }).await;

        if sections.is_empty() {
            return "Knowledge base not initialized. Please check the configured corpus and try again."
                .to_string();
        }

        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .filter(|term| term.len() > 2)
            .map(|term| term.to_string())
            .collect();

        let mut scored: Vec<(usize, &Section)> = sections
            .iter()
            .map(|section| (Self::score(section, &terms), section))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        if scored.is_empty() {
            return format!("No knowledge base entries matched '{}'.", query);
        }

        scored
            .iter()
            .take(self.top_k)
            .map(|(_, section)| format!("## {}\n\n{}", section.title, section.body))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Retrieval-augmented search tool over a knowledge base collaborator
pub struct RagSearchTool {
    knowledge: Arc<dyn KnowledgeBase>,
}

impl RagSearchTool {
    pub fn new(knowledge: Arc<dyn KnowledgeBase>) -> Self {
        Self { knowledge }
    }
}

impl Default for RagSearchTool {
    fn default() -> Self {
        Self::new(Arc::new(StaticKnowledgeBase::new()))
    }
}

#[async_trait]
impl Tool for RagSearchTool {
    fn name(&self) -> &str {
        "rag_search"
    }

    fn description(&self) -> &str {
        "Search the supply chain knowledge base: fundamentals, risk management, supplier evaluation, \
         logistics, inventory, technology, sustainability, compliance, and global considerations"
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The question or topic to search for in the supply chain knowledge base"
                }
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, args: &serde_json::Value) -> Result<String, ToolError> {
        let query = args["query"].as_str().unwrap_or_default();
        if query.is_empty() {
            return Ok("Error: a non-empty search query is required.".to_string());
        }
        Ok(self.knowledge.search(query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_finds_relevant_section() {
        let kb = StaticKnowledgeBase::new();
        let result = kb.search("how do I evaluate supplier financial stability").await;
        assert!(result.contains("Supplier Evaluation"));
    }

    #[tokio::test]
    async fn test_search_no_match_degrades_to_text() {
        let kb = StaticKnowledgeBase::new();
        let result = kb.search("zzzz qqqq").await;
        assert!(result.contains("No knowledge base entries matched"));
    }

    #[tokio::test]
    async fn test_rag_tool_requires_query() {
        let tool = RagSearchTool::default();
        let result = tool.invoke(&serde_json::json!({})).await.unwrap();
        assert!(result.starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_rag_tool_searches() {
        let tool = RagSearchTool::default();
        let result = tool
            .invoke(&serde_json::json!({"query": "inventory safety stock"}))
            .await
            .unwrap();
        assert!(result.contains("Inventory Management"));
    }

    #[test]
    fn test_index_splits_on_headers() {
        let sections = StaticKnowledgeBase::index(SUPPLY_CHAIN_KNOWLEDGE);
        assert_eq!(sections.len(), 9);
        assert_eq!(sections[0].title, "Supply Chain Fundamentals");
    }
}
