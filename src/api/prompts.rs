//! Static prompt templates.

use serde_json::{json, Value as J};

pub fn list() -> J {
    json!({
        "prompts": [
            {
                "name": "automate_task",
                "description": "Plan and execute a desktop task with the automation tools",
                "arguments": [
                    { "name": "task", "description": "What to accomplish", "required": true }
                ]
            },
            {
                "name": "describe_screen",
                "description": "Summarize the current screen for a human operator",
                "arguments": []
            }
        ]
    })
}

pub fn get(name: &str, args: &J) -> Option<J> {
    match name {
        "automate_task" => {
            let task = args.get("task").and_then(J::as_str).unwrap_or("(no task given)");
            Some(template(
                "Plan and execute a desktop task",
                format!(
                    "Accomplish the following task using the automation tools, one \
                     step at a time, verifying the screen state between steps: {task}"
                ),
            ))
        }
        "describe_screen" => Some(template(
            "Summarize the current screen",
            "Take a screenshot, list the open windows, and describe what the user \
             is currently looking at."
                .to_string(),
        )),
        _ => None,
    }
}

fn template(description: &str, text: String) -> J {
    json!({
        "description": description,
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": text }
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_prompts_are_gettable() {
        let v = list();
        for p in v["prompts"].as_array().unwrap() {
            let name = p["name"].as_str().unwrap();
            assert!(get(name, &json!({})).is_some(), "listed {name} must resolve");
        }
    }

    #[test]
    fn unknown_prompt_is_none() {
        assert!(get("does_not_exist", &json!({})).is_none());
    }

    #[test]
    fn automate_task_interpolates_argument() {
        let v = get("automate_task", &json!({"task": "open the settings app"})).unwrap();
        let text = v["messages"][0]["content"]["text"].as_str().unwrap();
        assert!(text.contains("open the settings app"));
    }
}
