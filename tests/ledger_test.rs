mod common;

use common::{january_transactions, parse_date, transaction};
use fintelli::domain::{
    Summary, Transaction, TransactionCandidate, compute_summary, format_brl, format_currency,
    format_date, sort_for_display, validate_transaction,
};

#[test]
fn test_end_to_end_summary() {
    let summary = compute_summary(&january_transactions());

    assert_eq!(
        summary,
        Summary {
            income: 600000,
            expense: 100000,
            balance: 500000,
        }
    );
    assert_eq!(format_brl(summary.income), "R$ 6.000,00");
    assert_eq!(format_brl(summary.expense), "R$ 1.000,00");
    assert_eq!(format_brl(summary.balance), "R$ 5.000,00");
}

#[test]
fn test_summary_ignores_order() {
    let transactions = january_transactions();
    let expected = compute_summary(&transactions);

    let mut reversed = transactions.clone();
    reversed.reverse();
    assert_eq!(compute_summary(&reversed), expected);

    // Every rotation gives the same result
    for shift in 0..transactions.len() {
        let mut rotated = transactions.clone();
        rotated.rotate_left(shift);
        assert_eq!(compute_summary(&rotated), expected, "rotation {shift}");
    }

    let mut sorted = transactions;
    sort_for_display(&mut sorted);
    assert_eq!(compute_summary(&sorted), expected);
}

#[test]
fn test_balance_is_income_minus_expense() {
    // Deterministic pseudo-random amounts, mixed signs, including zeros
    let mut seed: i64 = 42;
    let mut transactions: Vec<Transaction> = Vec::new();
    for id in 0..500 {
        seed = (seed * 1_103_515_245 + 12_345) % 2_147_483_648;
        let amount = (seed % 2_000_001) - 1_000_000;
        transactions.push(transaction(id, "random", amount, "2024-02-01"));

        let summary = compute_summary(&transactions);
        assert_eq!(summary.balance, summary.income - summary.expense);
        assert!(summary.income >= 0);
        assert!(summary.expense >= 0);
        assert_eq!(
            summary.balance,
            transactions.iter().map(|t| t.amount_cents).sum::<i64>()
        );
    }
}

#[test]
fn test_summary_is_idempotent() {
    let transactions = january_transactions();
    assert_eq!(compute_summary(&transactions), compute_summary(&transactions));
}

#[test]
fn test_display_order_is_newest_first() {
    let mut transactions = january_transactions();
    sort_for_display(&mut transactions);

    let ids: Vec<_> = transactions.iter().filter_map(|t| t.id).collect();
    assert_eq!(ids, vec![4, 2, 3, 1]);
    assert_eq!(transactions[0].transaction_date, parse_date("2024-01-12"));
}

#[test]
fn test_validation_reports_four_errors_in_order() {
    let candidate = TransactionCandidate {
        kind: Some("invalid".to_string()),
        description: String::new(),
        amount: Some(0.0),
        date: "invalid".to_string(),
    };

    let result = validate_transaction(&candidate);

    assert!(!result.is_valid());
    assert_eq!(result.errors.len(), 4);
    assert_eq!(
        result.messages(),
        vec![
            "Tipo de transação inválido",
            "Descrição é obrigatória",
            "Valor deve ser um número diferente de zero",
            "Data inválida",
        ]
    );
}

#[test]
fn test_presentation_formatting() {
    assert_eq!(format_currency(1234.56).unwrap(), "R$ 1.234,56");
    assert_eq!(format_currency(-500.0).unwrap(), "-R$ 500,00");
    assert_eq!(format_currency(0.0).unwrap(), "R$ 0,00");
    assert_eq!(format_currency(1234.5678).unwrap(), "R$ 1.234,57");
    assert!(format_currency(f64::NAN).is_err());

    assert_eq!(format_date("2024-01-15").unwrap(), "15/01/2024");
    assert_eq!(format_date("2024-01-15T10:30:00Z").unwrap(), "15/01/2024");
    assert!(format_date("not a date").is_err());
}
