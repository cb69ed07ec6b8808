//! Prompt builders for the five pipeline stages.
//!
//! Each stage's entire contract with the completion service lives in these
//! templates: the embedded JSON payload, the format instructions, and (for
//! the splitter) the arithmetic rule the model is trusted to apply.

/// Formats an amount the way the statement prompts expect it: comma-grouped
/// with two decimals, e.g. `12345.5` → `12,345.50`.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        int_grouped,
        frac_part
    )
}

/// Stage 1: identify which columns hold the account number, account name and
/// closing balance, given headers and up to two sample rows.
pub fn identify_columns(table_sample_json: &str) -> String {
    format!(
        r#"You are given a table with the following column names and 2 rows of data:
{table_sample_json}

Your task is to identify:
1. Which column contains the **Account Number**
2. Which column contains the **Account Name**
3. Which column contains the **Closing Balance**

Important guidelines:
- For **Account Number**:
  - It may be prefixed or combined with letters (e.g., "ACC12345", "A/C 98765")
  - Extract the column even if the account number is part of a longer string
  - Look for numeric patterns that could represent account identifiers

- For **Account Name**:
  - Be tolerant of spelling variations and mistakes
  - Ignore case differences (e.g., "SMITH JOHN" = "Smith John")
  - The name could be in various formats (first name first, last name first, etc.)

- For **Closing Balance**:
  - Look for monetary values, especially those labeled as "closing", "ending", or "balance"
  - May include currency symbols like $, €, £, etc.

Return the answer strictly in the following JSON format:
{{
  "account_number_column": "<column_name>",
  "account_name_column": "<column_name>",
  "closing_balance_column": "<column_name>"
}}
"#
    )
}

/// Stage 2: clean the three identified columns across the full row set.
pub fn clean_rows(
    account_col: &str,
    name_col: &str,
    balance_col: &str,
    rows_json: &str,
) -> String {
    format!(
        r#"You are given sample financial table data with the following columns:
- Account Number Column: "{account_col}"
- Account Name Column: "{name_col}"
- Closing Balance Column: "{balance_col}"

Sample data:
{rows_json}

Your task:
1. Clean the **Account Number** column: Extract only numeric parts if mixed with text (e.g., "A/C 1001" -> "1001").
2. Clean the **Account Name** column: Capitalize names properly and remove extra spaces (e.g., " john doe  " -> "John Doe").
3. Clean the **Closing Balance** column: Extract numeric value and remove currency symbols (e.g., "$1,000.50" -> 1000.50).

Return the cleaned data as a list of dictionaries with the following format:
[
  {{
    "account_number": "1001",
    "account_name": "John Doe",
    "closing_balance": 1000.5
  }},
  ...
]
Only output the JSON block, no additional explanation.
"#
    )
}

/// Stage 3: apply the sign-based debit/credit split. The rule is fully
/// stated here and never recomputed locally.
pub fn split_debit_credit(accounts_json: &str) -> String {
    format!(
        r#"Your task is to process a JSON array of financial accounts and transform it into a new format.

**Processing Instructions:**
- Extract "Account Number", "Account Name", and "Ending Balance".
- Create a new object with:
  - "Account Number": same as input.
  - "Account Name": same as input.
  - "Debit": If "Ending Balance" > 0, use "Ending Balance", else 0.
  - "Credit": If "Ending Balance" < 0, use absolute value, else 0.

**Input JSON:**
```json
{accounts_json}
```

**Expected Output Format:**
```json
[
    {{
        "Account Number": "1001",
        "Account Name": "Cash",
        "Debit": 5000,
        "Credit": 0
    }},
    {{
        "Account Number": "2001",
        "Account Name": "Accounts Payable",
        "Debit": 0,
        "Credit": 3000
    }}
]
```

**Return only the transformed JSON. No explanations.**
"#
    )
}

/// Stage 4: bucket every account into the five fundamental categories with
/// per-category and grand totals.
pub fn classify(trial_balance_json: &str) -> String {
    format!(
        r#"You are a financial accounting expert tasked with categorizing trial balance data into the five fundamental accounting categories.

INPUT FORMAT:
{trial_balance_json}

The input will be a JSON array of trial balance entries, where each entry has the following structure:
{{
"accountNumber": "string",
"accountName": "string",
"debit": number,  // will be null/0 if this is a credit entry
"credit": number  // will be null/0 if this is a debit entry
}}

TASK:
Categorize each account from the trial balance into one of these 5 categories:
1. Assets (Debit balance)
2. Liabilities (Credit balance)
3. Equity (Credit balance)
4. Expenses (Debit balance)
5. Revenue (Credit balance)

ACCOUNTING CLASSIFICATION RULES:
- Accounts starting with 1xxx typically represent Assets (normal balance: Debit)
- Accounts starting with 2xxx typically represent Liabilities (normal balance: Credit)
- Accounts starting with 3xxx typically represent Equity (normal balance: Credit)
- Accounts starting with 4xxx typically represent Revenue (normal balance: Credit)
- Accounts starting with 5xxx-6xxx typically represent Expenses (normal balance: Debit)

OUTPUT FORMAT:
Return only a valid JSON object without extra text, with this structure:

{{
"assets": [
    {{
    "accountNumber": "string",
    "accountName": "string",
    "amount": number,
    "balanceType": "string" // "Dr." or "Cr."
    }}
],
"liabilities": [ ... ],
"equity": [ ... ],
"expenses": [ ... ],
"revenue": [ ... ],
"totals": {{
    "assets": number,
    "liabilities": number,
    "equity": number,
    "expenses": number,
    "revenue": number,
    "debits": number,
    "credits": number
}}
}}

Ensure your categorization follows accounting principles and the account numbering conventions. The totals section should include the sum of amounts for each category and verification that total debits equal total credits.

VERIFICATION:
After categorizing, verify that:
1. The total of Assets (debit) equals the sum of Liabilities + Equity (credit) + (Revenue - Expenses)
2. Total Debits = Total Credits across all categories
"#
    )
}

/// Stage 5a: render the P&L statement. The net profit figure is computed
/// locally and embedded literally so the rendered value cannot drift.
pub fn profit_and_loss(
    financial_data_json: &str,
    total_revenue: f64,
    total_expenses: f64,
    net_profit: f64,
) -> String {
    let total_revenue = format_amount(total_revenue);
    let total_expenses = format_amount(total_expenses);
    let net_profit = format_amount(net_profit);
    format!(
        r#"# Profit and Loss Statement Generation Task

Your task is to create a formal Profit and Loss statement using the JSON data provided. The JSON contains categorized financial data including revenue, expenses, and their respective totals.

**Input Data:**
{financial_data_json}

**Output Requirements:**
Generate a clear, properly formatted Profit and Loss statement with the following specifications:

- Use the exact table structure provided below
- Present revenue on the top side and expenses below
- Include subtotals for each group and a grand total for net profit
- Format all currency values in Indian Rupees (₹)
- Use the following computed net profit: ₹{net_profit}

**Profit and Loss Statement Format:**
| **Revenue**               | **Amount (₹)**     |
|---------------------------|--------------------|
| Revenue Account 1         | [value]            |
| Revenue Account 2         | [value]            |
| ...                       | ...                |
| **Total Revenue**         | **₹{total_revenue}**        |

| **Expenses**              | **Amount (₹)**     |
|---------------------------|--------------------|
| Expense Account 1         | [value]            |
| Expense Account 2         | [value]            |
| ...                       | ...                |
| **Total Expenses**        | **₹{total_expenses}**        |

| **Net Profit**             | **Amount (₹)**     |
|---------------------------|--------------------|
|                           | **₹{net_profit}**  |

**Important Notes:**

- Replace placeholder text in square brackets with actual account names and values from the JSON.
- Include all revenue and expense accounts within their respective categories.
- Align numeric values properly for readability.
- Format currency values consistently (e.g., with commas as thousand separators).
"#
    )
}

/// Stage 5b: render the balance sheet, with net profit carried over from the
/// P&L stage as an equity line and an explicit both-sides-balance demand.
pub fn balance_sheet(financial_data_json: &str) -> String {
    format!(
        r#"# Balance Sheet Generation Task

Your task is to create a formal balance sheet using the JSON data provided. The JSON contains categorized financial data including assets, liabilities, equity, and their respective totals.

**Input Data:**
{financial_data_json}

**Output Requirements:**
Generate a clear, properly formatted balance sheet with the following specifications:

- Use the exact table structure provided below and show in table format.
- Present assets on the right side and liabilities & equity on the left side
- Group accounts by type (current assets, current liabilities, equity)
- Include subtotals for each group and grand totals
- Format all currency values in Indian Rupees (₹)
- Ensure that Total Assets equals Total Liabilities & Equity

**📊 Balance Sheet Format**
                                           BALANCE SHEET


| **Liabilities & Equity**            | **Amount (₹)** | **Assets**                         | **Amount (₹)** |
|-------------------------------------|----------------|------------------------------------|----------------|
| **Current Liabilities**             |                | **Current Assets**                 |                |
| Short-Term Liability 1              | ₹[Value]       | Current Asset 1                    | ₹[Value]       |
| Short-Term Liability 2              | ₹[Value]       | Current Asset 2                    | ₹[Value]       |
| **Total Current Liabilities**       | ₹[Total]       | **Total Current Assets**           | ₹[Total]       |
| **Non-Current Liabilities**         |                | **Non-Current Assets**             |                |
| Non-Current Liability 1             | ₹[Value]       | Non-Current Asset 1                | ₹[Value]       |
| Non-Current Liability 2             | ₹[Value]       | Non-Current Asset 2                | ₹[Value]       |
| **Total Non-Current Liabilities**   | ₹[Total]       | **Total Non-Current Assets**       | ₹[Total]       |
| **Total Liabilities**               | ₹[Total]       | **Total Assets**                   | ₹[Total]       |
| **Equity**                          |                |                                    |                |
| Owner's Equity                      | ₹[Value]       |                                    |                |
| Retained Earnings                   | ₹[Value]       |                                    |                |
| Net Profit                          | ₹[Value]       |                                    |                |
| **Total Liabilities & Equity**      | ₹[Total]       | **Total Assets**                   | ₹[Total]       |

Note: "Total liabilities & equity should be equal to Total Assets"

**Important Notes:**

- Replace placeholder text in square brackets with actual account names and values from the JSON.
- Include all accounts within each category.
- Align numeric values properly for readability.
- Verify that the final balance sheet balances (total assets = total liabilities + total equity). **important requirement**
- If non-current assets or non-current liabilities exist in the input, include them in the appropriate sections of the balance sheet.
- Format currency values consistently (e.g., with commas as thousand separators).

Please generate the balance sheet based on the provided JSON data following these specifications.
"#
    )
}
