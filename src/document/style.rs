//! Print stylesheet

use crate::language::TextDirection;

/// Stylesheet for a document laid out in the given direction.
pub fn stylesheet(direction: TextDirection) -> String {
    let dir = direction.as_str();
    let align = direction.align();

    format!(
        r"
body {{
  font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
  direction: {dir};
  text-align: {align};
  padding: 40px;
  max-width: 900px;
  margin: 0 auto;
  line-height: 1.6;
  color: #333;
}}
.header {{ text-align: center; border-bottom: 3px solid #00e5ff; padding-bottom: 20px; margin-bottom: 30px; }}
.logo {{
  font-size: 32px;
  font-weight: bold;
  background: linear-gradient(135deg, #00e5ff, #2196f3);
  -webkit-background-clip: text;
  -webkit-text-fill-color: transparent;
  margin-bottom: 10px;
}}
.section {{ margin-bottom: 30px; page-break-inside: avoid; }}
.section-title {{
  color: #00e5ff;
  font-size: 20px;
  font-weight: 600;
  border-bottom: 2px solid #e0e0e0;
  padding-bottom: 10px;
  margin-bottom: 15px;
}}
.field {{ margin-bottom: 12px; }}
.field-label {{ font-weight: 600; color: #555; display: inline-block; min-width: 150px; }}
.field-value {{ color: #000; }}
.field-value.block {{ margin-top: 8px; white-space: pre-wrap; }}
.field-value.cost {{ font-size: 18px; font-weight: bold; }}
.terms {{ background: #f5f5f5; padding: 20px; border-radius: 8px; margin-top: 20px; }}
.terms-list {{ list-style: decimal; padding-{align}: 20px; }}
.terms-list li {{ margin-bottom: 10px; }}
.terms-list li.custom {{ white-space: pre-wrap; }}
.signature-section {{ margin-top: 50px; display: flex; justify-content: space-between; gap: 40px; }}
.signature-box {{ flex: 1; border-top: 2px solid #333; padding-top: 10px; text-align: center; }}
.signature-name {{ font-size: 12px; color: #666; margin-top: 5px; }}
.footer {{
  margin-top: 50px;
  text-align: center;
  color: #888;
  font-size: 12px;
  border-top: 1px solid #ddd;
  padding-top: 20px;
}}
.draft-notice {{ color: #c62828; font-weight: 600; }}
@media print {{
  body {{ padding: 20px; }}
  .no-print {{ display: none; }}
}}
"
    )
}
