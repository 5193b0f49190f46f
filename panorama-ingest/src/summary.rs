use serde::Serialize;

use crate::model::{ConfigurationDocument, ObjectContainer, Rulebase};

/// Entry counts for a deserialized document, shared and device scopes
/// combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub device_groups: usize,
    pub templates: usize,
    pub template_stacks: usize,
    pub objects: usize,
    pub security_rules: usize,
    pub nat_rules: usize,
}

pub fn summarize(document: &ConfigurationDocument) -> IngestSummary {
    let mut summary = IngestSummary::default();
    add_objects(&mut summary, &document.shared.objects);
    add_rules(&mut summary, &document.shared.pre_rulebase);
    add_rules(&mut summary, &document.shared.post_rulebase);

    for device in &document.devices {
        summary.device_groups += device.device_groups.len();
        summary.templates += device.templates.len();
        summary.template_stacks += device.template_stacks.len();
        for group in &device.device_groups {
            add_objects(&mut summary, &group.objects);
            add_rules(&mut summary, &group.pre_rulebase);
            add_rules(&mut summary, &group.post_rulebase);
        }
    }
    summary
}

pub fn render(summary: IngestSummary) -> String {
    format!(
        "ingest_summary device_groups={} templates={} template_stacks={} objects={} security_rules={} nat_rules={}",
        summary.device_groups,
        summary.templates,
        summary.template_stacks,
        summary.objects,
        summary.security_rules,
        summary.nat_rules
    )
}

fn add_objects(summary: &mut IngestSummary, objects: &ObjectContainer) {
    summary.objects += objects.len();
}

fn add_rules(summary: &mut IngestSummary, rulebase: &Rulebase) {
    summary.security_rules += rulebase.security.len();
    summary.nat_rules += rulebase.nat.len();
}

#[cfg(test)]
mod tests {
    use super::{render, summarize, IngestSummary};
    use crate::bind::deserialize;

    #[test]
    fn counts_shared_and_device_group_entries() {
        let root = xml_tree_core::parse(
            br#"<config version="10.1.0">
  <panorama/>
  <shared>
    <address><entry name="a"><ip-netmask>10.0.0.1</ip-netmask></entry></address>
    <pre-rulebase><security><rules><entry name="r1"/></rules></security></pre-rulebase>
  </shared>
  <devices>
    <entry name="localhost.localdomain">
      <device-group>
        <entry name="dg1">
          <service><entry name="s1"><protocol><tcp><port>443</port></tcp></protocol></entry></service>
          <post-rulebase><nat><rules><entry name="n1"/></rules></nat></post-rulebase>
        </entry>
      </device-group>
      <template><entry name="t1"/></template>
    </entry>
  </devices>
</config>"#,
        )
        .expect("parse");
        let doc = deserialize(&root, "panorama").expect("deserialize");

        let summary = summarize(&doc);
        assert_eq!(
            summary,
            IngestSummary {
                device_groups: 1,
                templates: 1,
                template_stacks: 0,
                objects: 2,
                security_rules: 1,
                nat_rules: 1,
            }
        );
        assert_eq!(
            render(summary),
            "ingest_summary device_groups=1 templates=1 template_stacks=0 objects=2 security_rules=1 nat_rules=1"
        );
    }
}
