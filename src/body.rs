//! Resource body code for nested blocks.
//!
//! Every nested node is emitted as a `dynamic` block. The iteration source of
//! a mandatory node is used directly; a node that may be absent is guarded
//! against `null` so that it iterates zero times instead of failing. Blocks
//! with nothing settable below them are typed `optional(...)` and are guarded
//! the same way.

use crate::emit::{check_syntax, render};
use crate::error::Result;
use crate::model::SchemaNode;
use crate::schema::NestingMode;
use tracing::debug;

/// How a nested block iterates its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emission {
    /// `for_each = [source]` or `for_each = source`.
    Direct,
    /// `for_each = source == null ? ... : ...`.
    Conditional,
}

impl Emission {
    pub fn of(node: &SchemaNode) -> Self {
        if node.min_items() >= 1 && !node.is_read_only() {
            Emission::Direct
        } else {
            Emission::Conditional
        }
    }
}

/// The `for_each` expression iterating `source` for `node`.
pub fn for_each_expr(node: &SchemaNode, source: &str) -> String {
    match (Emission::of(node), node.is_singleton()) {
        (Emission::Direct, true) => format!("[{}]", source),
        (Emission::Direct, false) => source.to_owned(),
        (Emission::Conditional, true) => format!("{0} == null ? [] : [{0}]", source),
        (Emission::Conditional, false) if node.nesting_mode() == NestingMode::Map => {
            format!("{0} == null ? {{}} : {0}", source)
        }
        (Emission::Conditional, false) => format!("{0} == null ? [] : {0}", source),
    }
}

/// Renders the `dynamic` block for `node`, iterating over `source`.
///
/// Every nested block is checked to parse against its own address.
pub fn synthesize_block(node: &SchemaNode, source: &str) -> Result<String> {
    debug!("generating nested block {} from {}", node.address(), source);
    let scope = format!("{}.value", node.name());
    let children = node
        .children()
        .iter()
        .map(|child| synthesize_block(child, &format!("{}.{}", scope, child.name())))
        .collect::<Result<Vec<_>>>()?;

    let code = render(node.address(), |out| {
        out.open_block("dynamic", &[node.name()])?;
        out.attribute("for_each", &for_each_expr(node, source))?;
        out.open_block("content", &[])?;
        for attr in node.attributes() {
            out.attribute(&attr.name, &format!("{}.{}", scope, attr.name))?;
        }
        for child in &children {
            out.raw(child)?;
        }
        out.close_block()?;
        out.close_block()
    })?;
    check_syntax(node.address(), &code)?;
    Ok(code)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use crate::normalize::normalize_resource;
    use crate::test_utils::{block_from_json, normalized, trim_lines};
    use serde_json::json;

    fn child<'a>(node: &'a SchemaNode, name: &str) -> &'a SchemaNode {
        node.children().iter().find(|c| c.name() == name).unwrap()
    }

    #[test]
    fn test_optional_singleton_is_guarded() {
        let aks = normalized("azurerm_kubernetes_cluster");
        let identity = child(&aks, "identity");
        let actual = synthesize_block(identity, "var.kubernetes_cluster.identity").unwrap();
        let expected = r#"
dynamic "identity" {
  for_each = var.kubernetes_cluster.identity == null ? [] : [var.kubernetes_cluster.identity]
  content {
    identity_ids = identity.value.identity_ids
    type = identity.value.type
  }
}
"#;
        assert_eq!(Emission::of(identity), Emission::Conditional);
        assert_eq!(actual, expected.trim_start());
    }

    #[test]
    fn test_required_object() {
        let image = normalized("azurerm_shared_image");
        let identifier = child(&image, "identifier");
        let actual = synthesize_block(identifier, "var.shared_image_identifier").unwrap();
        let expected = r#"
dynamic "identifier" {
  for_each = [var.shared_image_identifier]
  content {
    offer = identifier.value.offer
    publisher = identifier.value.publisher
    sku = identifier.value.sku
  }
}
"#;
        assert_eq!(Emission::of(identifier), Emission::Direct);
        assert_eq!(trim_lines(&actual), trim_lines(expected));
    }

    #[test]
    fn test_required_set_from_attribute_is_not_guarded() {
        let group = normalized("azurerm_container_group");
        let port = child(&group, "exposed_port");
        let actual = synthesize_block(port, "var.container_group.exposed_port").unwrap();
        let expected = r#"
dynamic "exposed_port" {
  for_each = var.container_group.exposed_port
  content {
    port = exposed_port.value.port
    protocol = exposed_port.value.protocol
  }
}
"#;
        assert_eq!(trim_lines(&actual), trim_lines(expected));
    }

    #[test]
    fn test_container_group_container() {
        let group = normalized("azurerm_container_group");
        let container = child(&group, "container");
        let actual = synthesize_block(container, "var.container_group.container").unwrap();
        let expected = r#"
dynamic "container" {
  for_each = var.container_group.container
  content {
    cpu = container.value.cpu
    image = container.value.image
    name = container.value.name
    dynamic "gpu" {
      for_each = container.value.gpu == null ? [] : [container.value.gpu]
      content {
        count = gpu.value.count
        sku = gpu.value.sku
      }
    }
    dynamic "ports" {
      for_each = container.value.ports == null ? [] : container.value.ports
      content {
        port = ports.value.port
        protocol = ports.value.protocol
      }
    }
  }
}
"#;
        assert_eq!(actual, expected.trim_start());
    }

    #[test]
    fn test_map_block_guard() {
        let rules = normalized("azurerm_network_rules");
        let tag_group = child(&rules, "tag_group");
        assert_eq!(
            for_each_expr(tag_group, "var.network_rules.tag_group"),
            "var.network_rules.tag_group == null ? {} : var.network_rules.tag_group"
        );
        let actual = synthesize_block(tag_group, "var.network_rules.tag_group").unwrap();
        assert!(actual.contains("value = tag_group.value.value"));
    }

    #[test]
    fn test_optional_list_guard() {
        let rules = normalized("azurerm_network_rules");
        let rule = child(&rules, "rule");
        assert_eq!(
            for_each_expr(rule, "var.network_rules_rule"),
            "var.network_rules_rule == null ? [] : var.network_rules_rule"
        );
    }

    #[test]
    fn test_deeply_nested_scopes() {
        let vm = normalized("azurerm_site_recovery_replicated_vm");
        let disk = child(&vm, "managed_disk");
        let actual = synthesize_block(disk, "var.site_recovery_replicated_vm.managed_disk").unwrap();
        assert!(actual.contains("for_each = managed_disk.value.target_disk_encryption\n"));
        assert!(actual.contains(
            "for_each = target_disk_encryption.value.disk_encryption_key\n"
        ));
        assert!(actual.contains("vault_id = disk_encryption_key.value.vault_id"));
    }

    #[test]
    fn test_read_only_required_block_is_guarded() {
        let block = block_from_json(json!({
            "attributes": {
                "name": {"type": "string", "required": true}
            },
            "block_types": {
                "status": {
                    "nesting_mode": "list",
                    "min_items": 1,
                    "max_items": 1,
                    "block": {
                        "attributes": {
                            "state": {"type": "string", "computed": true}
                        },
                        "block_types": {
                            "inner": {
                                "nesting_mode": "list",
                                "min_items": 1,
                                "max_items": 1,
                                "block": {
                                    "attributes": {
                                        "code": {"type": "number", "computed": true}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }));
        let root = normalize_resource("azurerm_thing", &block).unwrap();
        let status = child(&root, "status");
        assert_eq!((status.min_items(), status.max_items()), (1, 1));
        assert_eq!(Emission::of(status), Emission::Conditional);
        let actual = synthesize_block(status, "var.thing.status").unwrap();
        let expected = r#"
dynamic "status" {
  for_each = var.thing.status == null ? [] : [var.thing.status]
  content {
    dynamic "inner" {
      for_each = status.value.inner == null ? [] : [status.value.inner]
      content {
      }
    }
  }
}
"#;
        assert_eq!(actual, expected.trim_start());
    }

    #[test]
    fn test_nested_syntax_error_names_the_nested_block() {
        let inner = SchemaNode::nested(
            "azurerm_thing.outer",
            "in valid",
            NestingMode::List,
            0,
            0,
            vec![],
            vec![],
        );
        let outer = SchemaNode::nested(
            "azurerm_thing",
            "outer",
            NestingMode::List,
            0,
            0,
            vec![],
            vec![inner],
        );
        match synthesize_block(&outer, "var.thing.outer").unwrap_err() {
            Error::Synthesis { address, .. } => assert_eq!(address, "azurerm_thing.outer.in valid"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
